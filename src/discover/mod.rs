// src/discover/mod.rs

//! Specification discovery.
//!
//! Recursively walks a specification root, visiting the children of each
//! directory concurrently, and collects every eligible entry file:
//!
//! - `main.tsp` is the primary entry file; `client.tsp`, if present, is
//!   preferred over it (mutually exclusive selection).
//! - A directory holding a registered legacy spec (see
//!   `[discovery].legacy-specs`) additionally emits that explicit file,
//!   so it can contribute up to two entries.
//! - Directories whose root-relative path contains a hard-excluded
//!   substring are skipped entirely, filter or no filter.
//! - The name filter is a case-insensitive substring test on the
//!   root-relative path; a non-matching directory emits nothing but its
//!   children are still visited (leaf filter, not a subtree prune).
//!
//! Sibling traversal order is non-deterministic, so the aggregated
//! result is sorted by path before it is returned, so which files are
//! chosen, and the order callers see, is always deterministic.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::task::JoinSet;
use tracing::debug;

use crate::config::DiscoverySection;
use crate::paths::{parent_key, relative_key};
use crate::types::SpecRoot;

/// Conventional primary entry file name.
pub const PRIMARY_ENTRY: &str = "main.tsp";

/// Conventional client entry file name, preferred over the primary.
pub const CLIENT_ENTRY: &str = "client.tsp";

/// One eligible specification entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSpec {
    /// Absolute path of the entry file.
    pub path: PathBuf,
    /// The root directory this spec was discovered under.
    pub root: PathBuf,
    /// Which of the two roots it belongs to.
    pub root_kind: SpecRoot,
}

impl DiscoveredSpec {
    /// Directory containing the entry file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.root)
    }
}

struct WalkContext {
    root: PathBuf,
    root_kind: SpecRoot,
    /// Lowercased filter substring; empty matches everything.
    filter: String,
    exclude: Vec<String>,
    legacy_specs: Vec<String>,
}

/// Discover every eligible entry file under `root`.
///
/// `filter` is a case-insensitive substring restricting which directory
/// paths are considered; pass `""` to match everything. A missing or
/// unreadable root is a fatal error.
pub async fn discover_specs(
    root: &Path,
    root_kind: SpecRoot,
    filter: &str,
    rules: &DiscoverySection,
) -> Result<Vec<DiscoveredSpec>> {
    let meta = tokio::fs::metadata(root)
        .await
        .with_context(|| format!("specification root {:?} is missing or unreadable", root))?;
    if !meta.is_dir() {
        return Err(anyhow!("specification root {:?} is not a directory", root));
    }

    let ctx = Arc::new(WalkContext {
        root: root.to_path_buf(),
        root_kind,
        filter: filter.to_lowercase(),
        exclude: rules.exclude.clone(),
        legacy_specs: rules.legacy_specs.clone(),
    });

    let mut specs = visit_dir(ctx, root.to_path_buf()).await?;
    specs.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        root = %root.display(),
        kind = %root_kind,
        count = specs.len(),
        "specification discovery complete"
    );
    Ok(specs)
}

/// Recursive fan-out/join walk over one directory.
///
/// Children are spawned as independent Tokio tasks and joined before
/// returning, so sibling subtrees are traversed concurrently. The
/// recursion goes through a boxed future to give the async call a
/// nameable type.
fn visit_dir(
    ctx: Arc<WalkContext>,
    dir: PathBuf,
) -> Pin<Box<dyn Future<Output = Result<Vec<DiscoveredSpec>>> + Send>> {
    Box::pin(async move {
        let rel = relative_key(&ctx.root, &dir).unwrap_or_default();

        // Hard exclusions apply before anything else. Every descendant's
        // relative path contains the same substring, so pruning the whole
        // subtree here is equivalent to testing each directory.
        if !rel.is_empty() && ctx.exclude.iter().any(|pat| rel.contains(pat.as_str())) {
            debug!(dir = %rel, "skipping hard-excluded specification path");
            return Ok(Vec::new());
        }

        let mut found = Vec::new();

        // The root itself never holds an entry; only subdirectories are
        // tested for inclusion. A non-matching directory emits nothing
        // but is still recursed into.
        if !rel.is_empty() && rel.to_lowercase().contains(&ctx.filter) {
            collect_entries(&ctx, &dir, &rel, &mut found).await;
        }

        let mut children = JoinSet::new();
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("reading specification directory {:?}", dir))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("iterating specification directory {:?}", dir))?
        {
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("inspecting directory entry {:?}", entry.path()))?;
            if file_type.is_dir() {
                children.spawn(visit_dir(Arc::clone(&ctx), entry.path()));
            }
        }

        while let Some(joined) = children.join_next().await {
            let child = joined.context("directory walk task panicked")??;
            found.extend(child);
        }

        Ok(found)
    })
}

/// Select the eligible entries contributed by a single directory.
///
/// Entry-file existence checks are non-fatal: absence just means no
/// entry is emitted for this directory.
async fn collect_entries(
    ctx: &WalkContext,
    dir: &Path,
    rel: &str,
    found: &mut Vec<DiscoveredSpec>,
) {
    // Registered legacy specs are emitted by their parent directory,
    // independently of whether the primary/client files exist.
    for legacy in ctx.legacy_specs.iter() {
        if parent_key(legacy) == rel {
            found.push(spec_for(ctx, ctx.root.join(legacy)));
        }
    }

    let client = dir.join(CLIENT_ENTRY);
    if is_file(&client).await {
        found.push(spec_for(ctx, client));
        return;
    }

    let primary = dir.join(PRIMARY_ENTRY);
    if is_file(&primary).await {
        found.push(spec_for(ctx, primary));
    }
}

fn spec_for(ctx: &WalkContext, path: PathBuf) -> DiscoveredSpec {
    DiscoveredSpec {
        path,
        root: ctx.root.clone(),
        root_kind: ctx.root_kind,
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
