//! Shared test utilities for noisegate integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top
//! of each harness file. Event fixtures are transcribed from real
//! conformance-run event logs so the harnesses exercise the same message
//! shapes production produces.

pub mod assertions;
pub mod builders;

pub use builders::*;
pub use fixtures::*;
