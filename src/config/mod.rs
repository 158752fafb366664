// src/config/mod.rs

//! Configuration loading and validation for specregen.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like distinct variant output directories
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    DiscoverySection, FlavorFlags, GeneratorSection, OptionSet, OptionSetEntry, OutputSection,
    RegenConfig, RootsSection,
};
pub use validate::validate_config;
