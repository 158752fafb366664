// tests/config.rs

use std::error::Error;
use std::fs;

use specregen::config::{default_config_path, load_and_validate, load_from_path, validate_config};
use specregen_test_utils::builders::{option_set, RegenConfigBuilder};
use specregen_test_utils::init_tracing;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

const SAMPLE_CONFIG: &str = r#"
[generator]
program = "npx tsp compile"
option-namespace = "@typespec/http-client-generator"

[roots]
primary = "node_modules/@typespec/http-specs/specs"
cross-cutting = "node_modules/@azure-tools/azure-http-specs/specs"

[output]
generated-dir = "generated"

[discovery]
exclude = ["client/structure/multi-service"]
legacy-specs = ["resiliency/srv-driven/old.tsp"]

[specs]
"special-words" = { package-name = "specialwords", namespace = "specialwords" }
"client/structure/multi-client" = [
    { package-name = "clienta", client-name = "ClientA" },
    { package-name = "clientb", client-name = "ClientB" },
]

[branded-specs]
"azure/core/basic" = { package-name = "azurecore-basic" }

[flavor-flags.branded]
generate-test = "true"

[flavor-flags.unbranded]
company-name = "Unbranded"
"#;

#[test]
fn sample_config_parses_and_validates() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let path = tmp.path().join("Specregen.toml");
    fs::write(&path, SAMPLE_CONFIG)?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.generator.program, "npx tsp compile");
    assert_eq!(cfg.roots.primary, "node_modules/@typespec/http-specs/specs");
    assert_eq!(cfg.output.generated_dir, "generated");
    assert_eq!(cfg.discovery.exclude, vec!["client/structure/multi-service"]);
    assert_eq!(cfg.discovery.legacy_specs, vec!["resiliency/srv-driven/old.tsp"]);

    assert_eq!(cfg.specs.len(), 2);
    let single = cfg.specs.get("special-words").expect("special-words entry");
    assert_eq!(single.variant_count(), 1);
    assert_eq!(
        single.variants()[0].get("package-name").map(String::as_str),
        Some("specialwords")
    );

    let multi = cfg
        .specs
        .get("client/structure/multi-client")
        .expect("multi-client entry");
    assert_eq!(multi.variant_count(), 2);

    assert!(cfg.branded_specs.contains_key("azure/core/basic"));
    assert_eq!(
        cfg.flavor_flags.branded.get("generate-test").map(String::as_str),
        Some("true")
    );
    assert_eq!(
        cfg.flavor_flags.unbranded.get("company-name").map(String::as_str),
        Some("Unbranded")
    );
    Ok(())
}

#[test]
fn empty_config_falls_back_to_defaults() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let path = tmp.path().join("Specregen.toml");
    fs::write(&path, "")?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.generator.program, "npx tsp compile");
    assert!(!cfg.generator.option_namespace.is_empty());
    assert!(cfg.specs.is_empty());
    assert!(cfg.branded_specs.is_empty());
    Ok(())
}

#[test]
fn missing_config_file_is_an_error() {
    init_tracing();
    let tmp = TempDir::new().expect("tempdir");
    let result = load_from_path(tmp.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn option_order_is_preserved() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let path = tmp.path().join("Specregen.toml");
    fs::write(
        &path,
        r#"
[specs]
"a" = { zeta = "1", alpha = "2", mid = "3" }
"#,
    )?;

    let cfg = load_from_path(&path)?;
    let keys: Vec<_> = cfg.specs.get("a").expect("entry").variants()[0]
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    Ok(())
}

#[test]
fn validation_rejects_indistinguishable_variants() {
    init_tracing();
    let cfg = RegenConfigBuilder::new()
        .with_spec_variants(
            "client/structure/multi-client",
            vec![
                option_set(&[("package-name", "same")]),
                option_set(&[("package-name", "same")]),
            ],
        )
        .build_unvalidated();

    assert!(validate_config(&cfg).is_err());
}

#[test]
fn validation_rejects_variants_without_an_output_identity() {
    init_tracing();
    let cfg = RegenConfigBuilder::new()
        .with_spec_variants(
            "client/structure/multi-client",
            vec![
                option_set(&[("client-name", "A")]),
                option_set(&[("client-name", "B")]),
            ],
        )
        .build_unvalidated();

    assert!(validate_config(&cfg).is_err());
}

#[test]
fn validation_rejects_an_empty_generator_program() {
    init_tracing();
    let cfg = RegenConfigBuilder::new().with_program("  ").build_unvalidated();
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn validation_rejects_empty_exclude_substrings() {
    init_tracing();
    let cfg = RegenConfigBuilder::new().with_exclude("").build_unvalidated();
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn default_config_path_is_in_the_working_directory() {
    assert_eq!(default_config_path().to_string_lossy(), "Specregen.toml");
}
