//! `setup`: build the web client, install the package, and stage its assets.
//!
//! Run from the project root. Reads an optional `setup.toml` there; without it
//! the standard layout is used.

use anyhow::{Context, Result};
use clap::Parser;

use setup::error::SetupError;
use setup::exit_codes;
use setup::io::config::{CONFIG_FILE, load_config};
use setup::io::console::Console;
use setup::io::interpreter::CommandProbe;
use setup::io::process::ShellRunner;
use setup::logging;
use setup::setup::run_setup;

#[derive(Parser)]
#[command(
    name = "setup",
    version,
    about = "Build the web client, install the package, and stage client assets"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();

    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run() -> Result<()> {
    let root = std::env::current_dir().context("resolve current directory")?;
    let cfg = load_config(&root.join(CONFIG_FILE))?;
    let console = Console::stdout();
    let runner = ShellRunner::new(console.clone());
    run_setup(&root, &cfg, &runner, &CommandProbe, &console)?;
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SetupError>() {
        Some(SetupError::NoInterpreterFound { .. }) => exit_codes::NO_INTERPRETER,
        _ => exit_codes::FAILED,
    }
}
