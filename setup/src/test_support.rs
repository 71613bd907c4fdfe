//! Test-only fakes for the process, probe, and console seams.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tempfile::TempDir;

use crate::error::SetupError;
use crate::io::config::SetupConfig;
use crate::io::interpreter::VersionProbe;
use crate::io::process::CommandRunner;

/// In-memory console sink whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console sink that records when each write arrived.
#[derive(Debug, Clone, Default)]
pub struct TimedBuffer(Arc<Mutex<Vec<(Instant, String)>>>);

impl TimedBuffer {
    pub fn writes(&self) -> Vec<(Instant, String)> {
        self.0.lock().expect("buffer lock").clone()
    }
}

impl Write for TimedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf).into_owned();
        self.0
            .lock()
            .expect("buffer lock")
            .push((Instant::now(), text));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Command runner that records calls and fails the commands it was told to.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    failures: HashMap<String, i32>,
    calls: RefCell<Vec<(String, Option<PathBuf>)>>,
}

impl ScriptedRunner {
    /// Make `command` exit with `exit_code`.
    pub fn failing(mut self, command: &str, exit_code: i32) -> Self {
        self.failures.insert(command.to_string(), exit_code);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<PathBuf>)> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str, workdir: Option<&Path>) -> Result<(), SetupError> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), workdir.map(Path::to_path_buf)));
        match self.failures.get(command) {
            Some(code) => Err(SetupError::command_failure(command, *code)),
            None => Ok(()),
        }
    }
}

/// Version probe that answers from a fixed set of working programs.
#[derive(Debug, Default)]
pub struct FakeProbe {
    available: Vec<String>,
    probed: RefCell<Vec<String>>,
}

impl FakeProbe {
    pub fn responding(programs: &[&str]) -> Self {
        Self {
            available: programs.iter().map(|p| p.to_string()).collect(),
            probed: RefCell::new(Vec::new()),
        }
    }

    /// Programs probed so far, in order.
    pub fn probed(&self) -> Vec<String> {
        self.probed.borrow().clone()
    }
}

impl VersionProbe for FakeProbe {
    fn responds(&self, program: &str) -> bool {
        self.probed.borrow_mut().push(program.to_string());
        self.available.iter().any(|p| p == program)
    }
}

/// Temp project root whose front-end build output already exists.
pub fn temp_project(cfg: &SetupConfig) -> TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = temp
        .path()
        .join(&cfg.frontend.dir)
        .join(&cfg.frontend.output_dir);
    fs::create_dir_all(output.join("build")).expect("create build output");
    fs::write(output.join("index.html"), "<!doctype html>\n").expect("write index");
    fs::write(output.join("build").join("bundle.js"), "console.log(1);\n")
        .expect("write bundle");
    temp
}
