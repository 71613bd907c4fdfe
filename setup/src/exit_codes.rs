//! Stable exit codes for the `setup` binary.

/// Setup completed and the run instruction was printed.
pub const OK: i32 = 0;
/// A command, filesystem step, or config load failed.
pub const FAILED: i32 = 1;
/// Every step succeeded but no interpreter candidate responded.
pub const NO_INTERPRETER: i32 = 2;
