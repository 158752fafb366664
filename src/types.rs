// src/types.rs

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Branding/feature mode for a regeneration run.
///
/// The flavor gates which configuration tables are consulted, which
/// always-on flags are injected, and which specification roots are in
/// scope:
///
/// - `Branded`: primary root + cross-cutting root, with the
///   `[branded-specs]` fallback table available.
/// - `Unbranded`: primary root only, no fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Branded,
    Unbranded,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Branded => "branded",
            Flavor::Unbranded => "unbranded",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "branded" => Ok(Flavor::Branded),
            "unbranded" => Ok(Flavor::Unbranded),
            other => Err(format!(
                "invalid flavor: {other} (expected \"branded\" or \"unbranded\")"
            )),
        }
    }
}

/// Which of the two specification roots a discovered spec came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecRoot {
    /// The generic specification tree, used by both flavors.
    Primary,
    /// The cross-cutting specification tree, used only by the branded
    /// flavor.
    CrossCutting,
}

impl SpecRoot {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecRoot::Primary => "primary",
            SpecRoot::CrossCutting => "cross-cutting",
        }
    }
}

impl fmt::Display for SpecRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
