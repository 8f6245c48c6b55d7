//! Application layer: CLI adapter, diagnostics, and the job harness.

pub mod check;
pub mod cli;
pub mod job;
pub mod report;
