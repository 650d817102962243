//! theme-migrate - Theme vocabulary migration for stylesheet sources
//!
//! Renames a retired theme's vocabulary (variant names, color tokens,
//! library URLs) to the current one across stylesheet text. The core is an
//! ordered list of find/replace rules applied sequentially: each rule sees
//! the cumulative output of the rules before it, every substituted match is
//! reported through an injectable observer, and changed output can be
//! written back to a file.
//!
//! # Example
//!
//! ```
//! use theme_migrate::{Patcher, SilentObserver};
//!
//! let patcher = Patcher::rebrand();
//! let outcome = patcher.apply("color: @mocha; accent: @{mauve};", &mut SilentObserver);
//!
//! assert!(outcome.changed);
//! assert_eq!(outcome.patched, "color: @winter; accent: @{skye};");
//! ```
//!
//! Custom rule lists work the same way:
//!
//! ```
//! use theme_migrate::{Patcher, Rule, SilentObserver};
//!
//! let patcher = Patcher::new(vec![Rule::literal("latte", "summer")]);
//! let outcome = patcher.apply("latte latte", &mut SilentObserver);
//! assert_eq!(outcome.patched, "summer summer");
//! ```

pub mod catalog;
pub mod engine;
pub mod observer;
pub mod rule;

pub use engine::{
    EmptyResult, MatchRecord, PatchError, PatchOptions, PatchOutcome, Patcher,
};
pub use observer::{
    ConsoleObserver, ObserverEvent, PatchObserver, RecordingObserver, SilentObserver,
};
pub use rule::{MatchContext, Replacement, Rule, RuleError};
