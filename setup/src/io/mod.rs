//! Side-effecting adapters used by the setup orchestration.

pub mod assets;
pub mod config;
pub mod console;
pub mod interpreter;
pub mod process;
