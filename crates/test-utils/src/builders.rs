#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use specregen::config::{validate_config, OptionSet, OptionSetEntry, RegenConfig};
use specregen::types::Flavor;

/// Build an `OptionSet` from string pairs, preserving order.
pub fn option_set(pairs: &[(&str, &str)]) -> OptionSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Builder for `RegenConfig` to simplify test setup.
pub struct RegenConfigBuilder {
    config: RegenConfig,
}

impl RegenConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RegenConfig::default(),
        }
    }

    pub fn with_primary_root(mut self, path: &str) -> Self {
        self.config.roots.primary = path.to_string();
        self
    }

    pub fn with_cross_cutting_root(mut self, path: &str) -> Self {
        self.config.roots.cross_cutting = path.to_string();
        self
    }

    pub fn with_generated_dir(mut self, path: &str) -> Self {
        self.config.output.generated_dir = path.to_string();
        self
    }

    pub fn with_option_namespace(mut self, ns: &str) -> Self {
        self.config.generator.option_namespace = ns.to_string();
        self
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.config.generator.program = program.to_string();
        self
    }

    pub fn with_exclude(mut self, substring: &str) -> Self {
        self.config.discovery.exclude.push(substring.to_string());
        self
    }

    pub fn with_legacy_spec(mut self, rel_file: &str) -> Self {
        self.config
            .discovery
            .legacy_specs
            .push(rel_file.to_string());
        self
    }

    pub fn with_spec(mut self, key: &str, opts: OptionSet) -> Self {
        self.config
            .specs
            .insert(key.to_string(), OptionSetEntry::One(opts));
        self
    }

    pub fn with_spec_variants(mut self, key: &str, variants: Vec<OptionSet>) -> Self {
        self.config
            .specs
            .insert(key.to_string(), OptionSetEntry::Many(variants));
        self
    }

    pub fn with_branded_spec(mut self, key: &str, opts: OptionSet) -> Self {
        self.config
            .branded_specs
            .insert(key.to_string(), OptionSetEntry::One(opts));
        self
    }

    pub fn with_flavor_flag(mut self, flavor: Flavor, key: &str, value: &str) -> Self {
        let flags = match flavor {
            Flavor::Branded => &mut self.config.flavor_flags.branded,
            Flavor::Unbranded => &mut self.config.flavor_flags.unbranded,
        };
        flags.insert(key.to_string(), value.to_string());
        self
    }

    /// Build and validate; panics on an invalid configuration.
    pub fn build(self) -> RegenConfig {
        validate_config(&self.config).expect("Failed to build valid config from builder");
        self.config
    }

    /// Build without validation, for tests exercising validation itself.
    pub fn build_unvalidated(self) -> RegenConfig {
        self.config
    }
}

impl Default for RegenConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that lays out a specification tree on disk for discovery
/// tests. Paths are relative to the root, forward-slash separated.
pub struct SpecTreeBuilder {
    root: PathBuf,
}

impl SpecTreeBuilder {
    pub fn new(root: &Path) -> Self {
        fs::create_dir_all(root).expect("creating spec tree root");
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create `rel_dir/main.tsp`.
    pub fn with_primary(self, rel_dir: &str) -> Self {
        self.with_file(&format!("{rel_dir}/main.tsp"), "// primary entry\n")
    }

    /// Create `rel_dir/client.tsp`.
    pub fn with_client(self, rel_dir: &str) -> Self {
        self.with_file(&format!("{rel_dir}/client.tsp"), "// client entry\n")
    }

    /// Create an empty directory.
    pub fn with_dir(self, rel_dir: &str) -> Self {
        fs::create_dir_all(self.root.join(rel_dir)).expect("creating spec directory");
        self
    }

    /// Create an arbitrary file with the given contents.
    pub fn with_file(self, rel_file: &str, contents: &str) -> Self {
        let path = self.root.join(rel_file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating spec directory");
        }
        fs::write(&path, contents).expect("writing spec file");
        self
    }
}
