// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;

use crate::types::{Flavor, SpecRoot};

/// One generator invocation's tunables: an ordered option name → value
/// mapping. Order matters because it is the order the serialized
/// `--option` tokens appear in on the command line.
pub type OptionSet = IndexMap<String, String>;

/// Top-level configuration as read from a TOML file.
///
/// This is a direct mapping of the shipped `Specregen.toml`:
///
/// ```toml
/// [generator]
/// program = "npx tsp compile"
/// option-namespace = "@typespec/http-client-generator"
///
/// [discovery]
/// legacy-specs = ["resiliency/srv-driven/old.tsp"]
///
/// [specs]
/// "special-words" = { package-name = "specialwords" }
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegenConfig {
    /// Generator invocation settings from `[generator]`.
    #[serde(default)]
    pub generator: GeneratorSection,

    /// The two specification roots from `[roots]`.
    #[serde(default)]
    pub roots: RootsSection,

    /// Generated-output settings from `[output]`.
    #[serde(default)]
    pub output: OutputSection,

    /// Discovery rules from `[discovery]`.
    #[serde(default)]
    pub discovery: DiscoverySection,

    /// Primary configuration table from `[specs]`.
    ///
    /// Keys are normalized root-relative specification keys (directory
    /// paths, or full file paths for registered legacy specs).
    #[serde(default)]
    pub specs: IndexMap<String, OptionSetEntry>,

    /// Secondary fallback table from `[branded-specs]`, consulted only
    /// when the current flavor is branded and `[specs]` has no entry.
    #[serde(default, rename = "branded-specs")]
    pub branded_specs: IndexMap<String, OptionSetEntry>,

    /// Always-on flags per flavor from `[flavor-flags.<flavor>]`.
    #[serde(default, rename = "flavor-flags")]
    pub flavor_flags: FlavorFlags,
}

impl RegenConfig {
    /// Config-relative path of the given specification root.
    pub fn root_path(&self, root: SpecRoot) -> &str {
        match root {
            SpecRoot::Primary => &self.roots.primary,
            SpecRoot::CrossCutting => &self.roots.cross_cutting,
        }
    }
}

/// A table entry: either a single option set, or an ordered list of
/// option sets (variant fan-out, one generator invocation per variant).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionSetEntry {
    One(OptionSet),
    Many(Vec<OptionSet>),
}

impl OptionSetEntry {
    /// Normalize to a list of variants.
    pub fn variants(&self) -> Vec<OptionSet> {
        match self {
            OptionSetEntry::One(opts) => vec![opts.clone()],
            OptionSetEntry::Many(list) => list.clone(),
        }
    }

    pub fn variant_count(&self) -> usize {
        match self {
            OptionSetEntry::One(_) => 1,
            OptionSetEntry::Many(list) => list.len(),
        }
    }
}

/// `[generator]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSection {
    /// The external generator command prefix, e.g. `npx tsp compile`.
    #[serde(default = "default_program")]
    pub program: String,

    /// The `<namespace>` part of every `--option <namespace>.<key>=<value>`
    /// token, typically the emitter package name.
    #[serde(default = "default_option_namespace", rename = "option-namespace")]
    pub option_namespace: String,
}

fn default_program() -> String {
    "npx tsp compile".to_string()
}

fn default_option_namespace() -> String {
    "@typespec/http-client-generator".to_string()
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            option_namespace: default_option_namespace(),
        }
    }
}

/// `[roots]` section: the two specification roots, relative to the
/// directory containing the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct RootsSection {
    #[serde(default = "default_primary_root")]
    pub primary: String,

    #[serde(default = "default_cross_cutting_root", rename = "cross-cutting")]
    pub cross_cutting: String,
}

fn default_primary_root() -> String {
    "node_modules/@typespec/http-specs/specs".to_string()
}

fn default_cross_cutting_root() -> String {
    "node_modules/@azure-tools/azure-http-specs/specs".to_string()
}

impl Default for RootsSection {
    fn default() -> Self {
        Self {
            primary: default_primary_root(),
            cross_cutting: default_cross_cutting_root(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Root directory for generated packages, relative to the config
    /// file's directory. Default output dirs are
    /// `<generated-dir>/<flavor>/<package>`.
    #[serde(default = "default_generated_dir", rename = "generated-dir")]
    pub generated_dir: String,
}

fn default_generated_dir() -> String {
    "generated".to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            generated_dir: default_generated_dir(),
        }
    }
}

/// `[discovery]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverySection {
    /// Hard-excluded path substrings (known-broken configurations).
    /// A directory whose root-relative path contains any of these is
    /// skipped entirely, regardless of the name filter.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Full root-relative file paths registered under the legacy
    /// convention, e.g. `resiliency/srv-driven/old.tsp`. Their parent
    /// directory emits this file *in addition to* its normal entry, and
    /// resolution keys them by the full file path instead of the
    /// directory.
    #[serde(default, rename = "legacy-specs")]
    pub legacy_specs: Vec<String>,
}

/// Always-on flags injected per flavor; they unconditionally overwrite
/// same-named keys already present in a resolved option set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlavorFlags {
    #[serde(default)]
    pub branded: OptionSet,

    #[serde(default)]
    pub unbranded: OptionSet,
}

impl FlavorFlags {
    pub fn for_flavor(&self, flavor: Flavor) -> &OptionSet {
        match flavor {
            Flavor::Branded => &self.branded,
            Flavor::Unbranded => &self.unbranded,
        }
    }
}
