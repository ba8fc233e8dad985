//! Domain-specific assertion macros for noisegate harnesses.
//!
//! These wrap plain panics with context-rich failure messages that make it
//! clear *which* verdict was wrong and what diagnostic output it actually
//! carried.

/// Assert that every verdict in a slice passed.
///
/// ```rust
/// assert_all_passed!(verdicts);
/// ```
#[macro_export]
macro_rules! assert_all_passed {
    ($verdicts:expr) => {{
        let verdicts: &[noisegate_core::Verdict] = &$verdicts;
        let failing: Vec<_> = verdicts.iter().filter(|v| v.failed).collect();
        if !failing.is_empty() {
            panic!(
                "assert_all_passed! failed: {} of {} verdicts failed.\n  First failure: {:?}\n  Output:\n{}",
                failing.len(),
                verdicts.len(),
                failing[0].name,
                failing[0].output
            );
        }
    }};
}

/// Assert that the first verdict failed.
#[macro_export]
macro_rules! assert_first_failed {
    ($verdicts:expr) => {{
        let verdicts: &[noisegate_core::Verdict] = &$verdicts;
        match verdicts.first() {
            Some(v) if v.failed => {}
            Some(v) => panic!(
                "assert_first_failed! failed: verdict {:?} passed.\n  Output:\n{}",
                v.name, v.output
            ),
            None => panic!("assert_first_failed! failed: no verdicts at all"),
        }
    }};
}

/// Assert that the first verdict's output contains a needle.
///
/// ```rust
/// assert_output_contains!(verdicts, "1 events with known BZs");
/// ```
#[macro_export]
macro_rules! assert_output_contains {
    ($verdicts:expr, $needle:expr) => {{
        let verdicts: &[noisegate_core::Verdict] = &$verdicts;
        let needle: &str = $needle;
        match verdicts.first() {
            Some(v) if v.output.contains(needle) => {}
            Some(v) => panic!(
                "assert_output_contains! failed: needle {:?} not in output of {:?}.\n  Output:\n{}",
                needle, v.name, v.output
            ),
            None => panic!("assert_output_contains! failed: no verdicts at all"),
        }
    }};
}

/// Assert that the first verdict's output does NOT contain a needle.
#[macro_export]
macro_rules! assert_output_lacks {
    ($verdicts:expr, $needle:expr) => {{
        let verdicts: &[noisegate_core::Verdict] = &$verdicts;
        let needle: &str = $needle;
        if let Some(v) = verdicts.first() {
            if v.output.contains(needle) {
                panic!(
                    "assert_output_lacks! failed: needle {:?} unexpectedly in output of {:?}.\n  Output:\n{}",
                    needle, v.name, v.output
                );
            }
        }
    }};
}
