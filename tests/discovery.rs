// tests/discovery.rs

use std::error::Error;

use specregen::config::DiscoverySection;
use specregen::discover::discover_specs;
use specregen::types::SpecRoot;
use specregen_test_utils::builders::SpecTreeBuilder;
use specregen_test_utils::init_tracing;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

fn no_rules() -> DiscoverySection {
    DiscoverySection::default()
}

#[tokio::test]
async fn primary_only_directory_yields_one_primary_entry() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path()).with_primary("encode/duration");

    let specs = discover_specs(tree.root(), SpecRoot::Primary, "", &no_rules()).await?;

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].path, tree.root().join("encode/duration/main.tsp"));
    assert_eq!(specs[0].root_kind, SpecRoot::Primary);
    Ok(())
}

#[tokio::test]
async fn client_entry_is_preferred_over_primary() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path())
        .with_primary("client/naming")
        .with_client("client/naming");

    let specs = discover_specs(tree.root(), SpecRoot::Primary, "", &no_rules()).await?;

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].path, tree.root().join("client/naming/client.tsp"));
    Ok(())
}

#[tokio::test]
async fn legacy_directory_yields_two_entries() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path())
        .with_primary("resiliency/srv-driven")
        .with_file("resiliency/srv-driven/old.tsp", "// legacy entry\n");

    let rules = DiscoverySection {
        legacy_specs: vec!["resiliency/srv-driven/old.tsp".to_string()],
        ..Default::default()
    };

    let specs = discover_specs(tree.root(), SpecRoot::Primary, "", &rules).await?;

    assert_eq!(specs.len(), 2);
    let paths: Vec<_> = specs.iter().map(|s| s.path.clone()).collect();
    assert!(paths.contains(&tree.root().join("resiliency/srv-driven/main.tsp")));
    assert!(paths.contains(&tree.root().join("resiliency/srv-driven/old.tsp")));
    Ok(())
}

#[tokio::test]
async fn legacy_entry_is_emitted_even_without_primary_or_client() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path()).with_dir("resiliency/srv-driven");

    let rules = DiscoverySection {
        legacy_specs: vec!["resiliency/srv-driven/old.tsp".to_string()],
        ..Default::default()
    };

    let specs = discover_specs(tree.root(), SpecRoot::Primary, "", &rules).await?;

    assert_eq!(specs.len(), 1);
    assert_eq!(
        specs[0].path,
        tree.root().join("resiliency/srv-driven/old.tsp")
    );
    Ok(())
}

#[tokio::test]
async fn hard_excluded_paths_yield_no_entries_regardless_of_filter() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path())
        .with_primary("client/structure/multi-service")
        .with_primary("client/structure/multi-service/nested")
        .with_primary("client/structure/default");

    let rules = DiscoverySection {
        exclude: vec!["multi-service".to_string()],
        ..Default::default()
    };

    // Filter names the excluded path explicitly; exclusion still wins.
    let specs = discover_specs(tree.root(), SpecRoot::Primary, "multi-service", &rules).await?;
    assert!(specs.is_empty());

    // With no filter, only the non-excluded sibling is found.
    let specs = discover_specs(tree.root(), SpecRoot::Primary, "", &rules).await?;
    assert_eq!(specs.len(), 1);
    assert_eq!(
        specs[0].path,
        tree.root().join("client/structure/default/main.tsp")
    );
    Ok(())
}

#[tokio::test]
async fn filter_is_case_insensitive() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path())
        .with_primary("encode/duration")
        .with_primary("special-words");

    let specs = discover_specs(tree.root(), SpecRoot::Primary, "DURATION", &no_rules()).await?;

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].path, tree.root().join("encode/duration/main.tsp"));
    Ok(())
}

#[tokio::test]
async fn filter_does_not_prune_subtrees() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    // "encode" itself does not match the filter, but its child does; the
    // child must still be found because the filter only gates leaf
    // inclusion, not recursion.
    let tree = SpecTreeBuilder::new(tmp.path())
        .with_file("encode/main.tsp", "// primary entry\n")
        .with_primary("encode/duration");

    let specs = discover_specs(tree.root(), SpecRoot::Primary, "duration", &no_rules()).await?;

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].path, tree.root().join("encode/duration/main.tsp"));
    Ok(())
}

#[tokio::test]
async fn missing_root_is_a_fatal_error() {
    init_tracing();
    let tmp = TempDir::new().expect("tempdir");
    let missing = tmp.path().join("does-not-exist");

    let result = discover_specs(&missing, SpecRoot::Primary, "", &no_rules()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn discovery_is_deterministic_across_runs() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let tree = SpecTreeBuilder::new(tmp.path())
        .with_primary("a/one")
        .with_primary("b/two")
        .with_client("c/three")
        .with_primary("c/three/nested");

    let first = discover_specs(tree.root(), SpecRoot::Primary, "", &no_rules()).await?;
    let second = discover_specs(tree.root(), SpecRoot::Primary, "", &no_rules()).await?;

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
    Ok(())
}
