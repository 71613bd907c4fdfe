//! Shell command execution with live forwarding of child output.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};

use crate::error::{SPAWN_FAILURE_EXIT_CODE, SetupError};
use crate::io::console::Console;

/// Exit code reported when the child's status could not be determined.
const UNKNOWN_EXIT_CODE: i32 = -1;

/// Abstraction over command execution so orchestration can be tested without
/// spawning processes.
pub trait CommandRunner {
    /// Run `command` through the platform shell, optionally inside `workdir`.
    ///
    /// Returns only once the child has exited. Any non-zero exit, or a failure
    /// to spawn at all, is reported as [`SetupError::CommandFailure`].
    fn run(&self, command: &str, workdir: Option<&Path>) -> Result<(), SetupError>;
}

/// Runs commands via `sh -c` (or `cmd /C` on Windows), streaming stdout and
/// stderr line by line to a [`Console`] while the child is still running.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    console: Console,
}

impl ShellRunner {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl CommandRunner for ShellRunner {
    #[instrument(skip_all, fields(command = %command, workdir = ?workdir))]
    fn run(&self, command: &str, workdir: Option<&Path>) -> Result<(), SetupError> {
        let mut cmd = shell_command(command);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("spawning child process");
        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                // main prints the one operator-facing line for this failure.
                debug!(err = %e, "failed to spawn command");
                return Err(SetupError::command_failure(
                    command,
                    SPAWN_FAILURE_EXIT_CODE,
                ));
            }
        };

        let status = match stream_until_exit(child, &self.console) {
            Ok(status) => status,
            Err(e) => {
                debug!(err = %format!("{e:#}"), "failed to wait for command");
                return Err(SetupError::command_failure(command, UNKNOWN_EXIT_CODE));
            }
        };

        debug!(exit_code = ?status.code(), "command finished");
        if status.success() {
            Ok(())
        } else {
            Err(SetupError::command_failure(command, exit_code(status)))
        }
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Forward both pipes of `child` to `console` until EOF, and wait for exit.
///
/// Each pipe gets its own reader thread so a chatty stream can never fill its
/// pipe buffer while we are blocked on the other one. Both readers are joined
/// before returning; a reader failure is logged and never masks the child's
/// exit status.
fn stream_until_exit(mut child: Child, console: &Console) -> Result<ExitStatus> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_console = console.clone();
    let stderr_console = console.clone();
    let stdout_handle = thread::spawn(move || forward_lines(stdout, &stdout_console));
    let stderr_handle = thread::spawn(move || forward_lines(stderr, &stderr_console));

    let status = child.wait().context("wait for command");
    join_readers([("stdout", stdout_handle), ("stderr", stderr_handle)]);
    status
}

fn join_readers(handles: [(&'static str, thread::JoinHandle<Result<()>>); 2]) {
    for (stream, handle) in handles {
        if let Err(e) = join_reader(handle) {
            warn!(stream, err = %format!("{e:#}"), "child output forwarding stopped early");
        }
    }
}

fn join_reader(handle: thread::JoinHandle<Result<()>>) -> Result<()> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

/// Forward `reader` to `console` one line at a time, as each line arrives.
fn forward_lines<R: Read>(reader: R, console: &Console) -> Result<()> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).context("read line")?;
        if n == 0 {
            break;
        }
        // Keep draining even if the console is gone; the child must not block.
        if let Err(e) = console.write_chunk(&line) {
            warn!(err = %e, "failed to forward child output");
        }
    }

    Ok(())
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => UNKNOWN_EXIT_CODE,
    }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(UNKNOWN_EXIT_CODE)
}
