//! Verdict rendering — turns evaluator output into something a human or a
//! CI pipeline can consume.
//!
//! Verdicts are plain data; both renderers here are pure serialization
//! with no knowledge of how the evaluator reached its judgment.

use noisegate_core::Verdict;

/// Render verdicts as human-readable text, one block per verdict.
///
/// Passing verdicts render as a single `PASS` line (plus any informational
/// output, indented); failing verdicts render `FAIL` with the diagnostic
/// indented beneath. Order is preserved.
pub fn render_text(verdicts: &[Verdict]) -> String {
    let mut out = String::new();
    for verdict in verdicts {
        let status = if verdict.failed { "FAIL" } else { "PASS" };
        out.push_str(status);
        out.push(' ');
        out.push_str(&verdict.name);
        out.push('\n');
        if !verdict.output.is_empty() {
            for line in verdict.output.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

/// Render verdicts as a JSON array.
pub fn render_json(verdicts: &[Verdict]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(verdicts)
}

/// True when no verdict in the list failed.
pub fn all_passed(verdicts: &[Verdict]) -> bool {
    verdicts.iter().all(|v| !v.failed)
}
