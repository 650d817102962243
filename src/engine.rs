//! Sequential substitution engine
//!
//! Applies an ordered rule list as a fold over the text: each rule sees the
//! cumulative output of the rules before it, so application order is part of
//! the contract. A rule that fails contributes nothing and the run continues.

use crate::catalog;
use crate::observer::PatchObserver;
use crate::rule::{Rule, RuleError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that surface to the caller
///
/// Rule failures never do; they are reported through the observer and the
/// failing rule is skipped.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to do when a rule reduces the whole text to an empty string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyResult {
    /// Empty output takes effect like any other result
    #[default]
    Honor,
    /// Empty output is dropped and the prior text kept for that step
    Discard,
}

/// Per-invocation options
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Write-back target for changed output
    pub file: Option<PathBuf>,
    /// When false, suppresses write-back even if `file` is set
    pub write: bool,
    /// Empty-output policy
    pub empty_result: EmptyResult,
}

impl PatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub fn empty_result(mut self, policy: EmptyResult) -> Self {
        self.empty_result = policy;
        self
    }
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            file: None,
            write: true,
            empty_result: EmptyResult::Honor,
        }
    }
}

/// One substituted occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Label of the rule that matched
    pub rule: String,
    /// The raw matched text
    pub matched: String,
    /// Byte offset of the match in the text the rule was applied to
    pub offset: usize,
}

/// Result of a patch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchOutcome {
    /// Final text; equals the input when nothing changed
    pub patched: String,
    /// Whether the final text differs from the input
    pub changed: bool,
    /// Every substitution that took effect, in application order
    pub substitutions: Vec<MatchRecord>,
}

impl PatchOutcome {
    pub fn substitution_count(&self) -> usize {
        self.substitutions.len()
    }
}

struct RuleResult {
    text: String,
    records: Vec<MatchRecord>,
}

/// Applies an ordered rule list to text
pub struct Patcher {
    rules: Vec<Rule>,
}

impl Patcher {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Patcher loaded with the built-in rebrand catalog
    pub fn rebrand() -> Self {
        Self::new(catalog::rebrand_rules())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Apply every rule in order and return the outcome
    ///
    /// Infallible: rule failures are reported to the observer and skipped.
    pub fn apply(&self, content: &str, observer: &mut dyn PatchObserver) -> PatchOutcome {
        self.run(content, EmptyResult::Honor, observer)
    }

    /// Apply every rule in order, then persist changed output when
    /// `options.file` is set and `options.write` is enabled
    ///
    /// Only a persistence failure surfaces as an error.
    pub fn apply_with_options(
        &self,
        content: &str,
        options: &PatchOptions,
        observer: &mut dyn PatchObserver,
    ) -> Result<PatchOutcome, PatchError> {
        let outcome = self.run(content, options.empty_result, observer);

        if outcome.changed && options.write {
            if let Some(path) = &options.file {
                fs::write(path, &outcome.patched).map_err(|source| PatchError::Write {
                    path: path.clone(),
                    source,
                })?;
                log::debug!("wrote patched output to {}", path.display());
                observer.on_write(path);
            }
        }

        Ok(outcome)
    }

    fn run(
        &self,
        content: &str,
        empty_result: EmptyResult,
        observer: &mut dyn PatchObserver,
    ) -> PatchOutcome {
        let mut current = content.to_string();
        let mut substitutions = Vec::new();

        for rule in &self.rules {
            match apply_rule(rule, &current, observer) {
                Ok(Some(result)) => {
                    if result.text.is_empty() && empty_result == EmptyResult::Discard {
                        log::debug!("rule `{}` emptied the text, discarded", rule.label());
                        continue;
                    }
                    current = result.text;
                    substitutions.extend(result.records);
                }
                Ok(None) => {}
                Err(error) => {
                    log::warn!("rule `{}` failed: {}", rule.label(), error);
                    observer.on_rule_error(rule.label(), &error);
                }
            }
        }

        let changed = current != content;
        if !changed {
            observer.on_unchanged();
        }

        PatchOutcome {
            patched: current,
            changed,
            substitutions,
        }
    }
}

/// Replace every occurrence of the rule's pattern in `text`
///
/// Returns `Ok(None)` when nothing matched. A failure from a computed
/// replacement discards the whole rule, including substitutions already
/// made for earlier matches; match notifications emitted up to that point
/// stand, mirroring the per-match feedback contract.
fn apply_rule(
    rule: &Rule,
    text: &str,
    observer: &mut dyn PatchObserver,
) -> Result<Option<RuleResult>, RuleError> {
    let regex = rule.regex()?;

    let mut out = String::with_capacity(text.len());
    let mut records = Vec::new();
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let matched = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };

        observer.on_match(rule.label(), matched.as_str());

        let substitute = rule.substitute(&caps, text)?;

        out.push_str(&text[last..matched.start()]);
        out.push_str(&substitute);
        records.push(MatchRecord {
            rule: rule.label().to_string(),
            matched: matched.as_str().to_string(),
            offset: matched.start(),
        });
        last = matched.end();
    }

    if records.is_empty() {
        return Ok(None);
    }

    out.push_str(&text[last..]);
    Ok(Some(RuleResult { text: out, records }))
}
