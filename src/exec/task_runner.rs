// src/exec/task_runner.rs

//! Individual generation task runner.

use std::io::ErrorKind;

use tracing::{debug, error, info, warn};

use crate::exec::backend::CommandRunner;
use crate::exec::pool::{GenerationTask, TaskOutcome};

/// Run a single generation task to completion.
///
/// The task's output directory is recursively deleted first; a deletion
/// failure is logged and the task proceeds anyway. The command's output
/// streams are logged line by line. Every failure mode is mapped into
/// the returned `TaskOutcome`; nothing propagates out of here, so the
/// owning worker always survives to claim its next task.
pub async fn run_generation_task(task: &GenerationTask, runner: &dyn CommandRunner) -> TaskOutcome {
    purge_output_dir(task).await;

    info!(task = %task.name, cmd = %task.command, "starting generation command");

    let output = match runner.run(&task.command).await {
        Ok(output) => output,
        Err(err) => {
            error!(
                task = %task.name,
                cmd = %task.command,
                error = %err,
                "generation command could not be executed"
            );
            return TaskOutcome::Error(err.to_string());
        }
    };

    for line in output.stdout.lines() {
        debug!(task = %task.name, "stdout: {}", line);
    }
    for line in output.stderr.lines() {
        debug!(task = %task.name, "stderr: {}", line);
    }

    if output.success() {
        info!(task = %task.name, "generation command succeeded");
        TaskOutcome::Success
    } else {
        error!(
            task = %task.name,
            cmd = %task.command,
            exit_code = output.exit_code,
            "generation command failed"
        );
        TaskOutcome::Failed(output.exit_code)
    }
}

/// Recursively delete the task's output directory, if present.
///
/// An absent directory is the normal first-run case; any other failure
/// is logged at warn and the task proceeds, regenerating on top of
/// whatever is left.
async fn purge_output_dir(task: &GenerationTask) {
    match tokio::fs::remove_dir_all(&task.output_dir).await {
        Ok(()) => {
            debug!(task = %task.name, dir = %task.output_dir.display(), "purged stale output directory");
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            warn!(
                task = %task.name,
                dir = %task.output_dir.display(),
                error = %err,
                "failed to purge output directory; generating anyway"
            );
        }
    }
}
