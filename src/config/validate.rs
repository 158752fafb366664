// src/config/validate.rs

use std::collections::HashSet;

use anyhow::{anyhow, Result};
use indexmap::IndexMap;

use crate::config::model::{OptionSetEntry, RegenConfig};

const PACKAGE_NAME_KEY: &str = "package-name";
const OUTPUT_DIR_KEY: &str = "emitter-output-dir";

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - generator program and option namespace are non-empty
/// - root paths are non-empty
/// - discovery rules are well-formed (no empty or backslashed entries)
/// - every multi-variant table entry gives each variant a distinct
///   output identity (explicit `emitter-output-dir` or `package-name`)
///
/// It does **not** resolve default output directories; collisions that
/// only appear after default injection are caught at resolution time.
pub fn validate_config(cfg: &RegenConfig) -> Result<()> {
    validate_generator(cfg)?;
    validate_roots(cfg)?;
    validate_discovery(cfg)?;
    validate_table("specs", &cfg.specs)?;
    validate_table("branded-specs", &cfg.branded_specs)?;
    Ok(())
}

fn validate_generator(cfg: &RegenConfig) -> Result<()> {
    if cfg.generator.program.trim().is_empty() {
        return Err(anyhow!("[generator].program must not be empty"));
    }
    if cfg.generator.option_namespace.trim().is_empty() {
        return Err(anyhow!("[generator].option-namespace must not be empty"));
    }
    Ok(())
}

fn validate_roots(cfg: &RegenConfig) -> Result<()> {
    if cfg.roots.primary.trim().is_empty() {
        return Err(anyhow!("[roots].primary must not be empty"));
    }
    if cfg.roots.cross_cutting.trim().is_empty() {
        return Err(anyhow!("[roots].cross-cutting must not be empty"));
    }
    Ok(())
}

fn validate_discovery(cfg: &RegenConfig) -> Result<()> {
    for pat in cfg.discovery.exclude.iter() {
        if pat.is_empty() {
            return Err(anyhow!(
                "[discovery].exclude must not contain empty substrings (would exclude everything)"
            ));
        }
    }
    for spec in cfg.discovery.legacy_specs.iter() {
        if spec.is_empty() || spec.contains('\\') {
            return Err(anyhow!(
                "[discovery].legacy-specs entry '{}' must be a non-empty, forward-slash relative file path",
                spec
            ));
        }
    }
    Ok(())
}

/// Every variant of a multi-variant entry must be distinguishable by its
/// output identity, otherwise the later variant would silently overwrite
/// the earlier one's generated output.
fn validate_table(table_name: &str, table: &IndexMap<String, OptionSetEntry>) -> Result<()> {
    for (key, entry) in table.iter() {
        if key.contains('\\') {
            return Err(anyhow!(
                "[{table_name}] key '{key}' must use forward slashes"
            ));
        }

        if entry.variant_count() < 2 {
            continue;
        }

        let mut seen = HashSet::new();
        for (idx, variant) in entry.variants().iter().enumerate() {
            let identity = variant
                .get(OUTPUT_DIR_KEY)
                .or_else(|| variant.get(PACKAGE_NAME_KEY))
                .cloned()
                .ok_or_else(|| {
                    anyhow!(
                        "[{table_name}] entry '{key}' variant {} has neither '{OUTPUT_DIR_KEY}' \
                         nor '{PACKAGE_NAME_KEY}'; variants must resolve to distinct output \
                         directories",
                        idx + 1
                    )
                })?;

            if !seen.insert(identity.clone()) {
                return Err(anyhow!(
                    "[{table_name}] entry '{key}' has two variants with output identity \
                     '{identity}'; each variant must target a distinct output directory"
                ));
            }
        }
    }
    Ok(())
}
