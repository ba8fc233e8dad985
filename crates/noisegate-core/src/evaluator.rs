//! Duplicated-event evaluation.
//!
//! [`DuplicateEventEvaluator`] consumes a run's ordered event log and
//! judges whether any event repeated abnormally often without an excuse:
//! repeat counts come from the message annotation (see
//! [`message`](crate::message)), excuses come from the allow-list and the
//! scoped known-problem records (see [`patterns`](crate::patterns)).
//!
//! Evaluation is a pure function of (events, compiled configuration,
//! platform, topology): no I/O, no hidden state, never aborts partway. A
//! shared evaluator may be used from several threads as long as
//! [`set_environment`](DuplicateEventEvaluator::set_environment) is not
//! called concurrently with [`check`](DuplicateEventEvaluator::check).

use crate::config::EvaluatorConfig;
use crate::message;
use crate::patterns::{KnownProblem, PatternError, PatternSet};
use crate::types::{EventInterval, Verdict};

/// Check name for ordinary (non-upgrade) runs.
pub const STABLE_SYSTEM_CHECK_NAME: &str = "events should not repeat";

/// Check name for upgrade runs.
pub const UPGRADE_CHECK_NAME: &str = "upgrade events should not repeat";

/// Judges repeated events against an allow-list and known-problem records.
///
/// All regexes compile at construction; an invalid pattern makes the
/// evaluator unconstructible rather than failing mid-evaluation.
#[derive(Debug, Clone)]
pub struct DuplicateEventEvaluator {
    allowed: PatternSet,
    known_problems: Vec<KnownProblem>,
    repeat_threshold: u64,
    platform: String,
    topology: String,
}

impl DuplicateEventEvaluator {
    /// Build an evaluator for an ordinary run: the base allow-list only.
    pub fn new(config: &EvaluatorConfig) -> Result<Self, PatternError> {
        Self::with_allow_list(config, config.allowed_patterns.iter())
    }

    /// Build an evaluator for an upgrade run: the base allow-list plus the
    /// upgrade-only entries.
    pub fn for_upgrade(config: &EvaluatorConfig) -> Result<Self, PatternError> {
        Self::with_allow_list(
            config,
            config
                .allowed_patterns
                .iter()
                .chain(&config.upgrade_allowed_patterns),
        )
    }

    fn with_allow_list<'a>(
        config: &EvaluatorConfig,
        allowed: impl Iterator<Item = &'a String>,
    ) -> Result<Self, PatternError> {
        let allowed = PatternSet::new(allowed)?;
        let known_problems = config
            .known_problems
            .iter()
            .map(|p| {
                let mut problem = KnownProblem::new(&p.pattern, &p.reference)?;
                if let Some(platform) = &p.platform {
                    problem = problem.on_platform(platform);
                }
                if let Some(topology) = &p.topology {
                    problem = problem.on_topology(topology);
                }
                Ok(problem)
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self {
            allowed,
            known_problems,
            repeat_threshold: config.repeat_threshold,
            platform: String::new(),
            topology: String::new(),
        })
    }

    /// Record the run's environment descriptors. Known-problem records
    /// scoped to a platform or topology only apply when these match.
    ///
    /// Call once before [`check`](Self::check); callers sharing an
    /// evaluator across threads must not mutate the environment while a
    /// check is in flight.
    pub fn set_environment(
        &mut self,
        platform: impl Into<String>,
        topology: impl Into<String>,
    ) {
        self.platform = platform.into();
        self.topology = topology.into();
    }

    /// Evaluate an ordered event log and produce verdicts for `name`.
    ///
    /// The verdict passes when every duplicated event is excused by the
    /// allow-list or a scoped known problem; known-problem matches are
    /// still reported in the output for visibility. With `flake_only`, a
    /// failing verdict is paired with a same-named passing companion so
    /// junit-style reporters count the failure as a flake instead of
    /// blocking the run.
    ///
    /// Diagnostic lines keep the original event order. Never fails: an
    /// empty or malformed event log yields a passing verdict.
    pub fn check(&self, name: &str, flake_only: bool, events: &[EventInterval]) -> Vec<Verdict> {
        let mut unexplained: Vec<String> = Vec::new();
        let mut known: Vec<String> = Vec::new();

        for event in events {
            let parsed = message::parse(&event.message);
            if parsed.count <= self.repeat_threshold {
                continue;
            }
            if self.allowed.is_match(&parsed.body) {
                tracing::debug!(
                    count = parsed.count,
                    body = %parsed.body,
                    "repeated event excused by allow-list"
                );
                continue;
            }
            // Every record is consulted so all applicable references are
            // attached, and a known event counts once, not per repeat.
            let references: Vec<&str> = self
                .known_problems
                .iter()
                .filter(|p| p.matches(&parsed.body, &self.platform, &self.topology))
                .map(KnownProblem::reference)
                .collect();
            if references.is_empty() {
                unexplained.push(format!(
                    "event happened {} times, something is wrong: {}",
                    parsed.count, parsed.body
                ));
            } else {
                known.push(format!(
                    "event happened {} times, known BZ {}: {}",
                    parsed.count,
                    references.join(", "),
                    parsed.body
                ));
            }
        }

        let mut sections: Vec<String> = Vec::new();
        if !unexplained.is_empty() {
            sections.push(format!(
                "{} events happened too frequently\n\n{}",
                unexplained.len(),
                unexplained.join("\n")
            ));
        }
        if !known.is_empty() {
            sections.push(format!(
                "{} events with known BZs\n\n{}",
                known.len(),
                known.join("\n")
            ));
        }
        let output = sections.join("\n\n");

        if unexplained.is_empty() {
            return vec![Verdict::pass_with_output(name, output)];
        }
        let mut verdicts = vec![Verdict::fail(name, output)];
        if flake_only {
            verdicts.push(Verdict::pass(name));
        }
        verdicts
    }
}

/// Run the ordinary repeated-event check over an event log.
pub fn check_stable_system(
    config: &EvaluatorConfig,
    platform: &str,
    topology: &str,
    events: &[EventInterval],
) -> Result<Vec<Verdict>, PatternError> {
    let mut evaluator = DuplicateEventEvaluator::new(config)?;
    evaluator.set_environment(platform, topology);
    Ok(evaluator.check(STABLE_SYSTEM_CHECK_NAME, false, events))
}

/// Run the repeated-event check for an upgrade run: the upgrade allow-list
/// applies and failures are reported as flakes.
pub fn check_upgrade(
    config: &EvaluatorConfig,
    platform: &str,
    topology: &str,
    events: &[EventInterval],
) -> Result<Vec<Verdict>, PatternError> {
    let mut evaluator = DuplicateEventEvaluator::for_upgrade(config)?;
    evaluator.set_environment(platform, topology);
    Ok(evaluator.check(UPGRADE_CHECK_NAME, true, events))
}
