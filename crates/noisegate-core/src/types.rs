//! Core types for noisegate-core.
//!
//! This module defines the data shapes shared between the evaluator and its
//! collaborators: the [`EventInterval`] consumed from a run's event log and
//! the [`Verdict`] handed to whatever reporting layer sits on top.

use serde::{Deserialize, Serialize};

/// One observed cluster event, as recorded by an external run monitor.
///
/// Immutable once created. The evaluator only reads `message`; the interval
/// bounds travel along so reporters can correlate verdicts back to the
/// run timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInterval {
    /// Rendered event description, e.g.
    /// `pod/x node/y - reason/NetworkNotReady ... (24 times)`.
    pub message: String,
    /// When the event was first observed (UTC).
    pub from: chrono::DateTime<chrono::Utc>,
    /// When the event was last observed. Equal to `from` for point events.
    pub to: chrono::DateTime<chrono::Utc>,
}

impl EventInterval {
    /// A point event: both interval bounds set to `at`.
    pub fn point(message: impl Into<String>, at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            message: message.into(),
            from: at,
            to: at,
        }
    }
}

/// A named pass/fail judgment for one logical check.
///
/// Plain data: any reporter can consume a verdict without depending on
/// evaluator internals. `output` is free-text diagnostic detail — empty on
/// a clean pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Check name this verdict belongs to.
    pub name: String,
    /// Whether the check failed.
    pub failed: bool,
    /// Human-readable diagnostic text. On failure, lists each unexplained
    /// duplicate's body and count; known tracked issues are reported here
    /// even when the verdict passes.
    pub output: String,
}

impl Verdict {
    /// A passing verdict with no diagnostic output.
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failed: false,
            output: String::new(),
        }
    }

    /// A passing verdict that still carries diagnostic detail (e.g. known
    /// tracked issues reported for visibility).
    pub fn pass_with_output(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failed: false,
            output: output.into(),
        }
    }

    /// A failing verdict with diagnostic output.
    pub fn fail(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failed: true,
            output: output.into(),
        }
    }
}
