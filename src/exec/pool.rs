// src/exec/pool.rs

//! Bounded-concurrency task pool.
//!
//! `min(limit, tasks.len())` workers pull indices off a shared atomic
//! counter: `fetch_add` hands each index to exactly one worker, so no
//! task is double-claimed or skipped. Each worker runs its claimed task
//! to completion before claiming another, records the outcome, and
//! keeps claiming; a failed task never stops its worker's lane. The
//! pool returns once every worker has exhausted the counter, with one
//! result per task in task order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinSet;
use tracing::debug;

use crate::exec::backend::CommandRunner;
use crate::exec::task_runner::run_generation_task;

/// The unit of concurrent work: a fully materialized command string
/// plus the output directory it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTask {
    pub name: String,
    pub command: String,
    pub output_dir: std::path::PathBuf,
}

/// Structured outcome of one generation task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// The command ran and exited non-zero.
    Failed(i32),
    /// The command could not be executed at all.
    Error(String),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }
}

/// One task's recorded result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub name: String,
    pub outcome: TaskOutcome,
}

/// Aggregated results of a pool run, in task order.
#[derive(Debug, Clone, Default)]
pub struct PoolReport {
    pub results: Vec<TaskResult>,
}

impl PoolReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !r.outcome.is_success())
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn merge(&mut self, other: PoolReport) {
        self.results.extend(other.results);
    }
}

/// Execute every task with at most `limit` running concurrently.
///
/// `limit` is clamped to the number of available tasks (and to at least
/// one worker). The returned report carries one result per task; the
/// pool itself only errors if a worker panics.
pub async fn run_pool(
    tasks: Vec<GenerationTask>,
    limit: usize,
    runner: Arc<dyn CommandRunner>,
) -> Result<PoolReport> {
    if tasks.is_empty() {
        return Ok(PoolReport::default());
    }

    let worker_count = limit.clamp(1, tasks.len());
    debug!(tasks = tasks.len(), workers = worker_count, "starting task pool");

    let tasks = Arc::new(tasks);
    let next_index = Arc::new(AtomicUsize::new(0));
    let mut workers = JoinSet::new();

    for worker_id in 0..worker_count {
        let tasks = Arc::clone(&tasks);
        let next_index = Arc::clone(&next_index);
        let runner = Arc::clone(&runner);

        workers.spawn(async move {
            let mut results = Vec::new();
            loop {
                let index = next_index.fetch_add(1, Ordering::SeqCst);
                if index >= tasks.len() {
                    break;
                }
                let task = &tasks[index];
                debug!(worker = worker_id, task = %task.name, "claimed task");

                let outcome = run_generation_task(task, runner.as_ref()).await;
                results.push((
                    index,
                    TaskResult {
                        name: task.name.clone(),
                        outcome,
                    },
                ));
            }
            debug!(worker = worker_id, "worker exhausted task counter");
            results
        });
    }

    let mut indexed = Vec::with_capacity(tasks.len());
    while let Some(joined) = workers.join_next().await {
        let worker_results = joined.context("pool worker panicked")?;
        indexed.extend(worker_results);
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(PoolReport {
        results: indexed.into_iter().map(|(_, result)| result).collect(),
    })
}
