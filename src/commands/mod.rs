//! CLI commands — environment bootstrapping and requirement installation.
//!
//! Each command is a single linear sequence of external invocations with
//! exit-code checks. Commands print human-readable status to stderr and
//! return `Err` on any failed step, so the process exits nonzero.

pub mod install;
pub mod menu;
pub mod venv;
