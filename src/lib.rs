// src/lib.rs

pub mod cli;
pub mod config;
pub mod discover;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod paths;
pub mod resolve;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::RegenConfig;
use crate::discover::discover_specs;
use crate::exec::{run_pool, GenerationTask, PoolReport, ShellCommandRunner};
use crate::resolve::{resolve_spec, ResolveContext};
use crate::types::{Flavor, SpecRoot};

/// Maximum number of generation commands in flight at once.
pub const POOL_LIMIT: usize = 30;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - specification discovery for the flavor's root(s)
/// - configuration resolution into a flat task list
/// - the bounded task pool
///
/// With no explicit `--flavor`, a full branded run is performed first,
/// then a full unbranded run; the two never interleave, although tasks
/// within each run execute concurrently.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let root_dir = config_root_dir(&config_path);
    let filter = args.filter.clone().unwrap_or_default();

    let flavors = match args.flavor {
        Some(flavor) => vec![flavor],
        None => vec![Flavor::Branded, Flavor::Unbranded],
    };

    let started = Instant::now();
    let mut report = PoolReport::default();

    for flavor in flavors {
        let tasks = collect_tasks(&cfg, &root_dir, flavor, args.debug, &filter).await?;
        info!(flavor = %flavor, tasks = tasks.len(), "resolved generation tasks");

        if args.dry_run {
            print_dry_run(flavor, &tasks);
            continue;
        }

        let runner = Arc::new(ShellCommandRunner);
        let flavor_report = run_pool(tasks, POOL_LIMIT, runner).await?;
        report.merge(flavor_report);
    }

    let elapsed = started.elapsed();

    if args.dry_run {
        info!(elapsed = ?elapsed, "dry-run complete (no execution)");
        return Ok(());
    }

    if report.is_success() {
        info!(
            tasks = report.total(),
            elapsed = ?elapsed,
            "regeneration finished successfully"
        );
        Ok(())
    } else {
        error!(
            failed = report.failed(),
            total = report.total(),
            elapsed = ?elapsed,
            "regeneration finished with failures"
        );
        Err(anyhow!(
            "{} of {} generation tasks failed",
            report.failed(),
            report.total()
        ))
    }
}

/// Discover, resolve and flatten every generation task for one flavor.
///
/// Both roots are always discovered; the branded flavor uses the union
/// of the cross-cutting and primary roots, the unbranded flavor only
/// the primary root.
pub async fn collect_tasks(
    cfg: &RegenConfig,
    root_dir: &Path,
    flavor: Flavor,
    debug: bool,
    filter: &str,
) -> Result<Vec<GenerationTask>> {
    let cross_root = root_dir.join(cfg.root_path(SpecRoot::CrossCutting));
    let primary_root = root_dir.join(cfg.root_path(SpecRoot::Primary));

    let cross = discover_specs(&cross_root, SpecRoot::CrossCutting, filter, &cfg.discovery).await?;
    let primary = discover_specs(&primary_root, SpecRoot::Primary, filter, &cfg.discovery).await?;

    let specs = match flavor {
        Flavor::Branded => cross.into_iter().chain(primary).collect::<Vec<_>>(),
        Flavor::Unbranded => primary,
    };

    let generated_root = root_dir.join(&cfg.output.generated_dir);
    let ctx = ResolveContext {
        config: cfg,
        flavor,
        debug,
        emitter_root: root_dir,
        generated_root: &generated_root,
    };

    let mut tasks = Vec::new();
    for spec in specs.iter() {
        let invocations = resolve_spec(&ctx, spec)?;
        let multi = invocations.len() > 1;
        for (idx, invocation) in invocations.into_iter().enumerate() {
            let name = if multi {
                format!("{}::{} #{}", flavor, invocation.spec_key, idx + 1)
            } else {
                format!("{}::{}", flavor, invocation.spec_key)
            };
            tasks.push(GenerationTask {
                name,
                command: invocation.command,
                output_dir: invocation.output_dir,
            });
        }
    }
    Ok(tasks)
}

/// Figure out the orchestrator's own root: the directory containing the
/// config file, or the current working directory for a bare filename.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: print the resolved task list.
fn print_dry_run(flavor: Flavor, tasks: &[GenerationTask]) {
    println!("specregen dry-run: flavor {flavor}, {} task(s):", tasks.len());
    for task in tasks {
        println!("  - {}", task.name);
        println!("      cmd: {}", task.command);
        println!("      out: {}", task.output_dir.display());
    }
    println!();
}
