//! Process runner adapters.
//!
//! The orchestrator shells out for git and package-manager work; these
//! adapters implement that port for production (`LocalProcessRunner`) and
//! tests (`RecordingProcessRunner`, which records invocations and can
//! inject failures).

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{Arc, Mutex},
};

use tracing::debug;

use precast_core::{
    application::{ApplicationError, ports::ProcessRunner},
    error::PrecastResult,
};

// ── Production ───────────────────────────────────────────────────────────────

/// Spawns real child processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProcessRunner;

impl LocalProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for LocalProcessRunner {
    fn run(&self, command: &str, args: &[&str], cwd: &Path) -> PrecastResult<()> {
        debug!(command, ?args, cwd = %cwd.display(), "Running external command");

        let status = Command::new(command)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ApplicationError::CommandFailed {
                command: format!("{command} {}", args.join(" ")),
                detail: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: format!("{command} {}", args.join(" ")),
                detail: format!("exited with {status}"),
            }
            .into())
        }
    }
}

// ── Test double ──────────────────────────────────────────────────────────────

/// One recorded `run` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Records every invocation instead of spawning; optionally fails calls
/// whose command line contains a configured pattern.
#[derive(Debug, Clone, Default)]
pub struct RecordingProcessRunner {
    inner: Arc<Mutex<RecorderInner>>,
}

#[derive(Debug, Default)]
struct RecorderInner {
    invocations: Vec<Invocation>,
    fail_patterns: Vec<String>,
}

impl RecordingProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation whose `command args...` line contains `pattern`.
    pub fn fail_matching(&self, pattern: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .fail_patterns
            .push(pattern.into());
    }

    /// All calls recorded so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.inner.lock().unwrap().invocations.clone()
    }

    /// Whether any call's command line contains `pattern`.
    pub fn ran(&self, pattern: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .invocations
            .iter()
            .any(|i| command_line(i).contains(pattern))
    }
}

fn command_line(invocation: &Invocation) -> String {
    format!("{} {}", invocation.command, invocation.args.join(" "))
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(&self, command: &str, args: &[&str], cwd: &Path) -> PrecastResult<()> {
        let invocation = Invocation {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        };
        let line = command_line(&invocation);

        let mut inner = self.inner.lock().unwrap();
        inner.invocations.push(invocation);

        if inner.fail_patterns.iter().any(|p| line.contains(p)) {
            return Err(ApplicationError::CommandFailed {
                command: line,
                detail: "injected failure".into(),
            }
            .into());
        }
        Ok(())
    }
}
