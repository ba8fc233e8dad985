//! Pattern matching for repeated-event triage.
//!
//! Two classes of pattern decide whether a repeated event is expected:
//!
//! - [`PatternSet`] — an allow-list; matching any member excuses the event
//!   unconditionally.
//! - [`KnownProblem`] — a tracked defect; matching excuses the event as
//!   "known" and attaches the tracking reference, but only when the
//!   record's platform/topology scope accepts the run's environment.
//!
//! All regexes compile at construction. An unparsable pattern is a fatal
//! configuration error surfaced as [`PatternError`] before any evaluation
//! can happen.

use regex::{Regex, RegexSet};

/// A pattern source string that failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid event pattern {pattern:?}")]
pub struct PatternError {
    /// The offending pattern source.
    pub pattern: String,
    #[source]
    source: regex::Error,
}

/// An allow-list of regexes combined with any-of semantics.
///
/// `is_match` returns true iff at least one member pattern matches a
/// substring of the text. The empty set matches nothing.
#[derive(Debug, Clone)]
pub struct PatternSet {
    set: RegexSet,
}

impl PatternSet {
    /// Compile a list of pattern sources into a combined matcher.
    ///
    /// Fails on the first pattern that does not compile, naming it.
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();
        // RegexSet's own error does not identify the offending member, so
        // compile each pattern individually first.
        for source in &sources {
            if let Err(err) = Regex::new(source) {
                return Err(PatternError {
                    pattern: source.clone(),
                    source: err,
                });
            }
        }
        let set = RegexSet::new(&sources).map_err(|err| PatternError {
            pattern: sources.join("|"),
            source: err,
        })?;
        Ok(Self { set })
    }

    /// True iff any member pattern matches a substring of `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Number of member patterns.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// True when the set has no member patterns (and so matches nothing).
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// A recognized, tracked defect that excuses matching repeated events.
///
/// Scope fields are three-way: `None` applies everywhere, `Some("")`
/// applies only when the run's value is itself empty, and `Some(v)`
/// requires an exact match.
#[derive(Debug, Clone)]
pub struct KnownProblem {
    regex: Regex,
    reference: String,
    platform: Option<String>,
    topology: Option<String>,
}

impl KnownProblem {
    /// Compile a known-problem record from its pattern source and tracking
    /// reference, unscoped (applies to every platform and topology).
    pub fn new(pattern: &str, reference: impl Into<String>) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|err| PatternError {
            pattern: pattern.to_string(),
            source: err,
        })?;
        Ok(Self {
            regex,
            reference: reference.into(),
            platform: None,
            topology: None,
        })
    }

    /// Restrict this record to a single platform value.
    pub fn on_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Restrict this record to a single topology value.
    pub fn on_topology(mut self, topology: impl Into<String>) -> Self {
        self.topology = Some(topology.into());
        self
    }

    /// The tracking reference attached to matches, e.g. a bug URL.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// True iff this record's regex matches the message body and its scope
    /// accepts the run's platform and topology.
    pub fn matches(&self, body: &str, platform: &str, topology: &str) -> bool {
        self.applies_to(platform, topology) && self.regex.is_match(body)
    }

    fn applies_to(&self, platform: &str, topology: &str) -> bool {
        self.platform.as_deref().is_none_or(|p| p == platform)
            && self.topology.as_deref().is_none_or(|t| t == topology)
    }
}
