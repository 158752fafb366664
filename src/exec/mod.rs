// src/exec/mod.rs

//! Generation command execution layer.
//!
//! - [`backend`] provides the `CommandRunner` trait and the concrete
//!   `ShellCommandRunner` used in production; tests can replace it with
//!   a fake implementation that doesn't spawn real processes.
//! - [`task_runner`] handles one generation task: purge the output
//!   directory, run the command, map the result to a `TaskOutcome`.
//! - [`pool`] owns the bounded worker pool that claims tasks off a
//!   shared counter and aggregates per-task results.

pub mod backend;
pub mod pool;
pub mod task_runner;

pub use backend::{CommandOutput, CommandRunner, ShellCommandRunner};
pub use pool::{run_pool, GenerationTask, PoolReport, TaskOutcome, TaskResult};
