//! Rule definition and substitution

use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while applying a single rule
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid pattern `{pattern}`: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("replacement failed: {0}")]
    Replacement(String),
}

impl RuleError {
    /// Build a replacement failure from any displayable cause
    pub fn replacement(message: impl Into<String>) -> Self {
        RuleError::Replacement(message.into())
    }
}

/// View of a single match handed to computed replacements
pub struct MatchContext<'a> {
    caps: &'a Captures<'a>,
    text: &'a str,
}

impl<'a> MatchContext<'a> {
    pub(crate) fn new(caps: &'a Captures<'a>, text: &'a str) -> Self {
        Self { caps, text }
    }

    /// The full matched substring
    pub fn matched(&self) -> &'a str {
        self.caps.get(0).map_or("", |m| m.as_str())
    }

    /// Positional capture group (group 0 is the whole match)
    pub fn group(&self, index: usize) -> Option<&'a str> {
        self.caps.get(index).map(|m| m.as_str())
    }

    /// Named capture group
    pub fn name(&self, name: &str) -> Option<&'a str> {
        self.caps.name(name).map(|m| m.as_str())
    }

    /// Byte offset of the match within the searched text
    pub fn offset(&self) -> usize {
        self.caps.get(0).map_or(0, |m| m.start())
    }

    /// The whole text being searched
    pub fn text(&self) -> &'a str {
        self.text
    }
}

/// Signature for computed replacements
pub type ReplacementFn =
    dyn Fn(&MatchContext<'_>) -> Result<String, RuleError> + Send + Sync;

/// How a rule produces substitute text
#[derive(Clone)]
pub enum Replacement {
    /// Every match is replaced with this string. Capture references
    /// (`$1`, `$name`) are expanded by the pattern engine.
    Literal(String),
    /// Invoked once per match; the returned string is the substitute.
    Computed(Arc<ReplacementFn>),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Replacement::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A single find/replace rule
///
/// The pattern is kept as source text and compiled on first use, so a
/// malformed pattern surfaces as a per-application failure instead of a
/// construction panic. The compiled form is cached.
#[derive(Debug, Clone)]
pub struct Rule {
    label: String,
    pattern: String,
    replacement: Replacement,
    compiled: OnceCell<Regex>,
}

impl Rule {
    /// Rule replacing every occurrence of `pattern` with a literal string
    pub fn literal(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            label: pattern.clone(),
            pattern,
            replacement: Replacement::Literal(replacement.into()),
            compiled: OnceCell::new(),
        }
    }

    /// Rule whose substitute text is computed per match
    pub fn computed<F>(pattern: impl Into<String>, replacer: F) -> Self
    where
        F: Fn(&MatchContext<'_>) -> Result<String, RuleError> + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        Self {
            label: pattern.clone(),
            pattern,
            replacement: Replacement::Computed(Arc::new(replacer)),
            compiled: OnceCell::new(),
        }
    }

    /// Rule renaming a `@`-prefixed token, with or without surrounding braces
    ///
    /// Matches `@from` and `@{from}` as a whole word and reconstructs the
    /// marker and any brace characters verbatim around the new token, so
    /// `@flavor` becomes `@variant` and `@{flavor}` becomes `@{variant}`.
    pub fn var_token(from: &str, to: &str) -> Self {
        let pattern = format!(
            r"@(?P<brl>\{{?)(?P<tok>{})\b(?P<brr>\}}?)",
            regex::escape(from)
        );
        let to = to.to_string();
        let label = format!("@{} -> @{}", from, to);
        Rule::computed(pattern, move |ctx: &MatchContext<'_>| {
            let brl = ctx.name("brl").unwrap_or("");
            let brr = ctx.name("brr").unwrap_or("");
            Ok(format!("@{}{}{}", brl, to, brr))
        })
        .with_label(label)
    }

    /// Override the label used in notifications and reports
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Label used in notifications and reports (defaults to the pattern)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The pattern source text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn regex(&self) -> Result<&Regex, RuleError> {
        self.compiled
            .get_or_try_init(|| Regex::new(&self.pattern))
            .map_err(|source| RuleError::BadPattern {
                pattern: self.pattern.clone(),
                source,
            })
    }

    /// Produce the substitute text for one match, dispatching on the
    /// replacement variant
    pub(crate) fn substitute<'t>(
        &self,
        caps: &'t Captures<'t>,
        text: &'t str,
    ) -> Result<String, RuleError> {
        match &self.replacement {
            Replacement::Literal(literal) => {
                let mut out = String::new();
                caps.expand(literal, &mut out);
                Ok(out)
            }
            Replacement::Computed(replacer) => {
                let ctx = MatchContext::new(caps, text);
                replacer(&ctx)
            }
        }
    }
}
