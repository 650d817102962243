//! Notification seam for the substitution engine
//!
//! The engine reports every substituted match, every failed rule, and the
//! end-of-run summary through a [`PatchObserver`] so feedback stays out of
//! the substitution logic and tests can assert on it directly.

use crate::rule::RuleError;
use std::path::{Path, PathBuf};

/// Receives engine notifications
///
/// All methods default to no-ops so implementors only override the events
/// they care about.
pub trait PatchObserver {
    /// One substituted occurrence. `matched` is always the raw matched
    /// text, even when the substitute was computed.
    fn on_match(&mut self, _rule: &str, _matched: &str) {}

    /// A rule failed to apply; its effect was skipped and the run continues.
    fn on_rule_error(&mut self, _rule: &str, _error: &RuleError) {}

    /// The run finished with output equal to the input.
    fn on_unchanged(&mut self) {}

    /// The patched output was persisted to `path`.
    fn on_write(&mut self, _path: &Path) {}
}

/// Discards all notifications
pub struct SilentObserver;

impl PatchObserver for SilentObserver {}

/// Plain-text feedback on stdout/stderr
pub struct ConsoleObserver;

impl PatchObserver for ConsoleObserver {
    fn on_match(&mut self, _rule: &str, matched: &str) {
        println!("/{}/", matched);
    }

    fn on_rule_error(&mut self, rule: &str, error: &RuleError) {
        eprintln!("rule `{}` skipped: {}", rule, error);
    }

    fn on_unchanged(&mut self) {
        println!("No changes to apply");
    }

    fn on_write(&mut self, path: &Path) {
        println!("Writing patched output to {}", path.display());
    }
}

/// A recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    Match { rule: String, matched: String },
    RuleError { rule: String, message: String },
    Unchanged,
    Write(PathBuf),
}

/// Captures notifications for assertions
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<ObserverEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw matched texts, in notification order
    pub fn matches(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Match { matched, .. } => Some(matched.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ObserverEvent::RuleError { .. }))
            .count()
    }

    pub fn saw_unchanged(&self) -> bool {
        self.events.contains(&ObserverEvent::Unchanged)
    }

    pub fn written_paths(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Write(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }
}

impl PatchObserver for RecordingObserver {
    fn on_match(&mut self, rule: &str, matched: &str) {
        self.events.push(ObserverEvent::Match {
            rule: rule.to_string(),
            matched: matched.to_string(),
        });
    }

    fn on_rule_error(&mut self, rule: &str, error: &RuleError) {
        self.events.push(ObserverEvent::RuleError {
            rule: rule.to_string(),
            message: error.to_string(),
        });
    }

    fn on_unchanged(&mut self) {
        self.events.push(ObserverEvent::Unchanged);
    }

    fn on_write(&mut self, path: &Path) {
        self.events.push(ObserverEvent::Write(path.to_path_buf()));
    }
}
