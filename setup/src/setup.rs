//! Orchestration for a single `setup` run.
//!
//! Installs and builds the web client, installs the package, stages the built
//! client assets inside the package sources, then tells the operator how to
//! start the application.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

use crate::core::attempts::first_success;
use crate::core::plan::{SetupPlan, Step};
use crate::io::assets::replace_dir;
use crate::io::config::SetupConfig;
use crate::io::console::Console;
use crate::io::interpreter::{VersionProbe, locate};
use crate::io::process::CommandRunner;

/// Result of a completed setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    /// Interpreter command that answered the version probe.
    pub interpreter: String,
    /// Script the operator should run, relative to the project root.
    pub script: PathBuf,
}

impl SetupOutcome {
    /// Command line the operator is asked to run.
    pub fn instruction(&self) -> String {
        format!("{} {}", self.interpreter, self.script.display())
    }
}

/// Derive the ordered step list for a project rooted at `root`.
pub fn build_plan(root: &Path, cfg: &SetupConfig) -> SetupPlan {
    let frontend_dir = root.join(&cfg.frontend.dir);
    let assets_source = cfg.frontend.dir.join(&cfg.frontend.output_dir);

    SetupPlan {
        steps: vec![
            Step::Command {
                announce: "Installing client dependencies...".to_string(),
                command: cfg.frontend.install.clone(),
                workdir: frontend_dir.clone(),
            },
            Step::Command {
                announce: "Building client...".to_string(),
                command: cfg.frontend.build.clone(),
                workdir: frontend_dir,
            },
            Step::Install {
                announce: "Installing package...".to_string(),
                attempts: cfg.package.installers.clone(),
                workdir: root.to_path_buf(),
            },
            Step::ReplaceDir {
                announce: format!(
                    "Copying {} to {}...",
                    assets_source.display(),
                    cfg.package.assets_dir.display()
                ),
                source: root.join(&assets_source),
                destination: root.join(&cfg.package.assets_dir),
            },
        ],
        interpreters: cfg.launch.interpreters.clone(),
        script: cfg.launch.script.clone(),
    }
}

/// Run the whole setup sequence; the first failing step aborts the run.
///
/// Steps that already completed are left as they are. The final instruction
/// is printed only when an interpreter was located.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn run_setup<R: CommandRunner, P: VersionProbe>(
    root: &Path,
    cfg: &SetupConfig,
    runner: &R,
    probe: &P,
    console: &Console,
) -> Result<SetupOutcome> {
    let plan = build_plan(root, cfg);

    for step in &plan.steps {
        say(console, step.announce())?;
        run_step(step, runner, console)?;
    }

    let interpreter = locate(&plan.interpreters, probe)?;
    let outcome = SetupOutcome {
        interpreter,
        script: plan.script,
    };

    say(console, "Now run:")?;
    say(console, &format!("\n\n\t{}", outcome.instruction()))?;
    debug!(instruction = %outcome.instruction(), "setup complete");
    Ok(outcome)
}

fn run_step<R: CommandRunner>(step: &Step, runner: &R, console: &Console) -> Result<()> {
    match step {
        Step::Command {
            command, workdir, ..
        } => run_announced(runner, console, command, workdir),
        Step::Install {
            attempts, workdir, ..
        } => first_success(
            attempts,
            |command| run_announced(runner, console, command, workdir),
            |command, err| info!(command = %command, err = %format!("{err:#}"), "installer failed, trying next"),
        )
        .ok_or_else(|| anyhow!("no installer commands configured"))?,
        Step::ReplaceDir {
            source,
            destination,
            ..
        } => replace_dir(source, destination),
    }
}

fn run_announced<R: CommandRunner>(
    runner: &R,
    console: &Console,
    command: &str,
    workdir: &Path,
) -> Result<()> {
    say(console, &format!("Running: {command}"))?;
    runner.run(command, Some(workdir))?;
    Ok(())
}

fn say(console: &Console, text: &str) -> Result<()> {
    console.line(text).context("write to console")
}
