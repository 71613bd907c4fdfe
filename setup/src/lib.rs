//! One-shot local build and installation orchestrator.
//!
//! Builds the web client, installs the package, stages the client assets
//! inside the package sources, and tells the operator how to start the app.
//! The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (step plan, fallback policy).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (process execution, filesystem,
//!   console). Isolated behind traits to enable fakes in tests.
//!
//! [`setup`] coordinates core logic with I/O to implement the `setup` binary.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod setup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
