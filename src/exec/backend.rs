// src/exec/backend.rs

//! Pluggable command-runner abstraction.
//!
//! The task runner talks to a `CommandRunner` instead of spawning
//! processes directly. This makes it easy to swap in a fake runner in
//! tests while keeping the production implementation here.
//!
//! - `ShellCommandRunner` is the default implementation: it hands the
//!   command string to the platform shell via `tokio::process::Command`
//!   and captures the full output.
//! - Tests can provide their own `CommandRunner` that, for example,
//!   records which commands were run and fabricates exit codes.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;

use crate::errors::Result;

/// Captured result of one finished generator process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait abstracting how a materialized command string is executed.
///
/// Production code uses [`ShellCommandRunner`]; tests can provide their
/// own implementation that doesn't spawn real processes.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and capture its output.
    ///
    /// Spawn failures are errors; a non-zero exit is a normal
    /// `CommandOutput` with `success() == false`.
    fn run<'a>(
        &'a self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>>;
}

/// Real command runner used in production.
///
/// Runs the command through `sh -c` (or `cmd /C` on Windows) with both
/// output streams captured.
#[derive(Debug, Clone, Default)]
pub struct ShellCommandRunner;

impl CommandRunner for ShellCommandRunner {
    fn run<'a>(
        &'a self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            // Build a shell command appropriate for the platform.
            let mut cmd = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(command);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(command);
                c
            };

            cmd.stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let output = cmd
                .output()
                .await
                .with_context(|| format!("spawning generator process for `{command}`"))?;

            Ok(CommandOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}
