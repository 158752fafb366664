// src/resolve/mod.rs

//! Configuration resolution.
//!
//! Turns one discovered specification into one or more fully
//! materialized generator invocations:
//!
//! 1. Compute the specification key (root-relative directory, or the
//!    full relative file path for registered legacy specs).
//! 2. Look the key up in `[specs]`, then (branded flavor only) in
//!    `[branded-specs]`, falling back to a single empty option set.
//! 3. For every variant, inject the flavor, the flavor's always-on
//!    flags, a default output directory when none is given, the debug
//!    flag, and the sibling `examples` directory.
//! 4. Serialize each option set into `--option <namespace>.<key>=<value>`
//!    tokens and materialize the full command string.
//!
//! Resolution is pure: the same spec and flavor always resolve to the
//! same invocations. Two variants of one spec resolving to the same
//! output directory is rejected as a configuration error rather than
//! silently overwriting.

pub mod command;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{OptionSet, RegenConfig};
use crate::discover::DiscoveredSpec;
use crate::errors::{RegenError, Result};
use crate::paths::{default_package_name, normalized, parent_key, relative_key};
use crate::types::Flavor;

pub use command::materialize_command;

/// Option key for the generator's output directory.
pub const OUTPUT_DIR_KEY: &str = "emitter-output-dir";
/// Option key for the generated package name.
pub const PACKAGE_NAME_KEY: &str = "package-name";
/// Injected option carrying the current flavor.
pub const FLAVOR_KEY: &str = "flavor";
/// Injected option enabling generator debug output.
pub const DEBUG_KEY: &str = "debug";
/// Injected option pointing at the spec's sibling `examples` directory.
pub const EXAMPLES_DIR_KEY: &str = "examples-dir";

/// Everything resolution needs besides the spec itself.
pub struct ResolveContext<'a> {
    pub config: &'a RegenConfig,
    pub flavor: Flavor,
    pub debug: bool,
    /// The orchestrator's own root, passed to the generator as the
    /// emitter bundle.
    pub emitter_root: &'a Path,
    /// Fixed generated-output root; default output dirs live under
    /// `<generated_root>/<flavor>/<package>`.
    pub generated_root: &'a Path,
}

/// One fully materialized generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInvocation {
    /// The configuration key the spec resolved under.
    pub spec_key: String,
    /// Shell-invokable command string.
    pub command: String,
    /// Output directory, purged before the command runs.
    pub output_dir: PathBuf,
}

/// Resolve all generator invocations for one discovered specification.
pub fn resolve_spec(
    ctx: &ResolveContext<'_>,
    spec: &DiscoveredSpec,
) -> Result<Vec<ResolvedInvocation>> {
    let rel_file = relative_key(&spec.root, &spec.path).ok_or_else(|| {
        RegenError::ConfigError(format!(
            "specification {:?} is not under its root {:?}",
            spec.path, spec.root
        ))
    })?;

    // Legacy specs are keyed by the full relative file path; everything
    // else by the containing directory.
    let rel_dir = parent_key(&rel_file).to_string();
    let key = if ctx.config.discovery.legacy_specs.contains(&rel_file) {
        rel_file.clone()
    } else {
        rel_dir.clone()
    };

    let variants = lookup_variants(ctx.config, ctx.flavor, &key);
    let flags = ctx.config.flavor_flags.for_flavor(ctx.flavor);
    let spec_dir = spec.dir();

    let mut invocations = Vec::with_capacity(variants.len());
    for mut opts in variants {
        opts.insert(FLAVOR_KEY.to_string(), ctx.flavor.as_str().to_string());

        // Always-on flags overwrite same-named keys already present.
        for (flag, value) in flags.iter() {
            opts.insert(flag.clone(), value.clone());
        }

        let output_dir = match opts.get(OUTPUT_DIR_KEY).map(PathBuf::from) {
            Some(explicit) => explicit,
            None => {
                let package = opts
                    .get(PACKAGE_NAME_KEY)
                    .cloned()
                    .unwrap_or_else(|| default_package_name(&rel_dir));
                let dir = ctx
                    .generated_root
                    .join(ctx.flavor.as_str())
                    .join(&package);
                opts.insert(OUTPUT_DIR_KEY.to_string(), normalized(&dir));
                dir
            }
        };

        if ctx.debug {
            opts.insert(DEBUG_KEY.to_string(), "true".to_string());
        }

        opts.insert(
            EXAMPLES_DIR_KEY.to_string(),
            normalized(&spec_dir.join("examples")),
        );

        let args = serialize_options(&ctx.config.generator.option_namespace, &opts);
        let cmd = materialize_command(
            &ctx.config.generator.program,
            &spec.path,
            ctx.emitter_root,
            &args,
        );

        invocations.push(ResolvedInvocation {
            spec_key: key.clone(),
            command: cmd,
            output_dir,
        });
    }

    ensure_distinct_output_dirs(&key, &invocations)?;
    Ok(invocations)
}

/// Look a key up across the layered tables, normalized to a variant
/// list. No entry means a single empty option set.
fn lookup_variants(config: &RegenConfig, flavor: Flavor, key: &str) -> Vec<OptionSet> {
    if let Some(entry) = config.specs.get(key) {
        return entry.variants();
    }
    if flavor == Flavor::Branded {
        if let Some(entry) = config.branded_specs.get(key) {
            return entry.variants();
        }
    }
    vec![OptionSet::new()]
}

/// Serialize an option set into its ordered `--option` token string.
/// Values containing whitespace are wrapped in quotes.
pub fn serialize_options(namespace: &str, opts: &OptionSet) -> String {
    opts.iter()
        .map(|(key, value)| format!("--option {namespace}.{key}={}", quoted(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quoted(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn ensure_distinct_output_dirs(key: &str, invocations: &[ResolvedInvocation]) -> Result<()> {
    let mut seen = HashSet::new();
    for invocation in invocations {
        let dir = normalized(&invocation.output_dir);
        if !seen.insert(dir.clone()) {
            return Err(RegenError::DuplicateOutputDir {
                spec: key.to_string(),
                dir,
            });
        }
    }
    Ok(())
}
