//! noisegate — decides whether repeated cluster events should fail a CI run.
//!
//! The core evaluation logic lives in [`noisegate_core`]; this crate adds
//! the reporting layer and the `noisegate` binary. Integration harnesses
//! under `tests/` drive both through the public API.
//!
//! ```text
//! event log (JSON) ──► noisegate-core evaluator ──► report ──► stdout / exit code
//! ```

pub mod report;
