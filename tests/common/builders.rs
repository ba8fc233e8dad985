//! Test builders — ergonomic constructors for event logs and evaluator
//! configuration.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning
//! `Result`.

use noisegate_core::{EvaluatorConfig, EventInterval, KnownProblemConfig};

/// Build a point event at a fixed instant.
///
/// All fixtures share the same timestamp: the evaluator only reads the
/// message, and a fixed instant keeps assertion output stable.
pub fn event(message: impl Into<String>) -> EventInterval {
    EventInterval::point(
        message,
        chrono::DateTime::from_timestamp(1, 0).expect("fixed fixture timestamp is valid"),
    )
}

/// Build an event whose message carries a repeat annotation:
/// `"<body> (<count> times)"`.
pub fn repeated(body: &str, count: u64) -> EventInterval {
    event(format!("{body} ({count} times)"))
}

/// An unscoped known-problem entry.
pub fn known_problem(pattern: &str, reference: &str) -> KnownProblemConfig {
    KnownProblemConfig {
        pattern: pattern.to_string(),
        reference: reference.to_string(),
        platform: None,
        topology: None,
    }
}

/// Fluent builder for [`EvaluatorConfig`] test fixtures.
///
/// # Example
///
/// ```rust
/// let config = ConfigBuilder::new()
///     .allowed(r"reason/Unhealthy Readiness probe failed")
///     .problem(known_problem(r"reason/SomeEvent", "https://issues.example.com/1"))
///     .build();
/// ```
pub struct ConfigBuilder {
    config: EvaluatorConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EvaluatorConfig::default(),
        }
    }

    pub fn threshold(mut self, threshold: u64) -> Self {
        self.config.repeat_threshold = threshold;
        self
    }

    pub fn allowed(mut self, pattern: &str) -> Self {
        self.config.allowed_patterns.push(pattern.to_string());
        self
    }

    pub fn upgrade_allowed(mut self, pattern: &str) -> Self {
        self.config
            .upgrade_allowed_patterns
            .push(pattern.to_string());
        self
    }

    pub fn problem(mut self, problem: KnownProblemConfig) -> Self {
        self.config.known_problems.push(problem);
        self
    }

    pub fn build(self) -> EvaluatorConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
