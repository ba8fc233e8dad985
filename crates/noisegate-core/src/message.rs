//! Repeat-count extraction from rendered event messages.
//!
//! Run monitors coalesce recurring events into a single message with a
//! trailing `(N times)` annotation. [`parse`] splits that annotation off so
//! the evaluator can match patterns against the stable message body.

use std::sync::OnceLock;

use regex::Regex;

/// An event message with any trailing repeat annotation stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// The message with the trailing ` (N times)` suffix removed when
    /// present; otherwise the input verbatim.
    pub body: String,
    /// Parsed repeat count; 0 when no annotation is present.
    pub count: u64,
}

/// Trailing annotation: exactly one space, `(`, ASCII digits, ` times)`,
/// anchored at end-of-string. Anything else is not a count.
fn count_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r" \(([0-9]+) times\)$").expect("count suffix pattern must be valid")
    })
}

/// Split a raw event message into its body and repeat count.
///
/// Total and deterministic: malformed input (no annotation, empty digit
/// group, digits too large for the count type) yields the input unchanged
/// with count 0. No trimming beyond the matched suffix — embedded newlines
/// and trailing whitespace in the body survive.
pub fn parse(raw: &str) -> ParsedMessage {
    if let Some(caps) = count_suffix().captures(raw) {
        if let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) {
            if let Ok(count) = digits.as_str().parse::<u64>() {
                return ParsedMessage {
                    body: raw[..whole.start()].to_string(),
                    count,
                };
            }
        }
    }
    ParsedMessage {
        body: raw.to_string(),
        count: 0,
    }
}
