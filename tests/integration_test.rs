//! Integration tests for naming-miner
//!
//! These tests drive full runs through the public API to verify:
//! - Reports carry the expected counts, ranking and samples
//! - Sharded and sequential runs produce identical results
//! - Percentages stay within [0, 1] and top-K limits hold
//! - Configuration files change the run as expected
//! - Fatal conditions surface as errors, including cancellation mid-run

use naming_miner::{
    load_mining_config, AnalysisInput, Analyzer, CancellationToken, Identifier, MiningConfig,
    MiningError, PatternMode, ProjectAnalysis, ReportKind, RunContext, ScanSummary,
};
use std::collections::BTreeMap;

fn test_method(owner: &str, name: &str) -> Identifier {
    Identifier::new(name).with_population("test").with_owner(owner)
}

fn source_method(owner: &str, name: &str) -> Identifier {
    Identifier::new(name).with_population("main").with_owner(owner)
}

/// A small project: two test classes and their production classes.
fn fixture_identifiers() -> Vec<Identifier> {
    vec![
        test_method("UserServiceTest", "shouldReturnUserWhenIdExists"),
        test_method("UserServiceTest", "shouldThrowExceptionWhenIdMissing"),
        test_method("UserServiceTest", "save"),
        test_method("UserServiceTest", "testDelete"),
        test_method("ParserTest", "whenInputInvalidThenThrows"),
        test_method("ParserTest", "parseInvalidJsonThrowsException"),
        test_method("ParserTest", "test_empty_input"),
        test_method("OrderServiceTest", "shouldReturnOrderWhenIdExists"),
        source_method("UserService", "save"),
        source_method("UserService", "delete"),
        source_method("Parser", "parse"),
    ]
}

/// A larger generated population with heavy key collisions, so sample
/// capping and merging are exercised across many shards.
fn generated_identifiers(n: usize) -> Vec<Identifier> {
    let verbs = ["Return", "Throw", "Save", "Load", "Reject"];
    let nouns = ["User", "Order", "Null", "Empty", "Invalid", "Id", "Json"];
    (0..n)
        .map(|i| {
            let name = match i % 4 {
                0 => format!("should{}{}", verbs[i % verbs.len()], nouns[i % nouns.len()]),
                1 => format!("when{}Then{}", nouns[i % nouns.len()], verbs[i % verbs.len()]),
                2 => format!("test_{}_{}", nouns[i % nouns.len()], i % 11).to_lowercase(),
                _ => format!("given{}{}Fails", nouns[(i / 3) % nouns.len()], verbs[i % verbs.len()]),
            };
            test_method(&format!("Class{}Test", i % 9), &name)
        })
        .collect()
}

fn run(config: MiningConfig, identifiers: Vec<Identifier>) -> ProjectAnalysis {
    Analyzer::new(config)
        .run(AnalysisInput::new("demo", identifiers), &RunContext::new())
        .expect("run failed")
}

#[test]
fn test_fixture_naming_report() {
    let analysis = run(MiningConfig::default(), fixture_identifiers());
    let naming = analysis.report(ReportKind::TestMethodNaming).unwrap();

    assert_eq!(naming.total_count(), 8);
    assert_eq!(naming.get("All tests").unwrap().count, 8);
    assert_eq!(naming.get("Start with \"test\"").unwrap().count, 2);
    assert_eq!(naming.get("contains \"_\"").unwrap().count, 1);
    assert_eq!(naming.get("camelCase").unwrap().count, 6);
    assert_eq!(naming.get("no CamelCase").unwrap().count, 2);

    let same = naming.get("same name for source and test").unwrap();
    assert_eq!(same.count, 1);
    assert_eq!(same.sample, "UserServiceTest.save");

    let convention = analysis.convention.as_ref().unwrap();
    assert_eq!(
        convention.headline,
        "lowerCamelCase method names, no 'test' prefix, minimal underscores"
    );
    assert!(convention.rationale.contains("camel-like: 75.0%"));
}

#[test]
fn test_fixture_token_report() {
    let analysis = run(MiningConfig::default(), fixture_identifiers());
    let tokens = analysis.report(ReportKind::Tokens).unwrap();

    assert_eq!(tokens.total_count(), 34);
    let top = &tokens.items()[0];
    assert_eq!(top.name, "when");
    assert_eq!(top.count, 4);
    assert!((top.percent() - 4.0 / 34.0).abs() < 1e-9);
    assert_eq!(tokens.get("should").unwrap().count, 3);
    assert_eq!(tokens.get("throws").unwrap().count, 2);
    assert_eq!(tokens.get("throw").unwrap().count, 1);
}

#[test]
fn test_fixture_patterns_and_ngrams() {
    let analysis = run(MiningConfig::default(), fixture_identifiers());

    let patterns = analysis.report(ReportKind::Patterns).unwrap();
    assert_eq!(patterns.total_count(), 6);
    let dominant = &patterns.items()[0];
    assert_eq!(dominant.name, "Should Return <any> When <any>");
    assert_eq!(dominant.count, 2);
    assert_eq!(
        dominant.sample,
        "shouldReturnUserWhenIdExists\nshouldReturnOrderWhenIdExists"
    );
    assert!(patterns
        .get("Should Throws Exception When <any> Missing")
        .is_some());
    assert!(analysis
        .pattern_summary
        .as_deref()
        .unwrap()
        .starts_with("Should Return <any> When <any> (2 of 6"));

    let bigrams = analysis.report(ReportKind::Bigrams).unwrap();
    assert_eq!(bigrams.get("^ → should").unwrap().count, 3);
    assert_eq!(bigrams.get("^ → ^").unwrap().count, 8);

    assert_eq!(
        analysis.ngram_summary.as_deref(),
        Some("should return order when id exists")
    );
    let trigrams = analysis.report(ReportKind::Trigrams).unwrap();
    assert_eq!(
        trigrams.help,
        "Most likely name (greedy): should return order when id exists"
    );
}

#[test]
fn test_granular_mode() {
    let config = MiningConfig::default().with_pattern_mode(PatternMode::Granular);
    let analysis = run(config, fixture_identifiers());
    let patterns = analysis.report(ReportKind::Patterns).unwrap();
    assert_eq!(
        patterns.items()[0].name,
        "Should Return <w> When <w> <w>"
    );
}

#[test]
fn test_sharding_does_not_change_results() {
    let ids = generated_identifiers(1500);
    let baseline = serde_json::to_value(run(
        MiningConfig::default().with_workers(1).with_shard_size(100_000),
        ids.clone(),
    ))
    .unwrap();

    let configs = [
        MiningConfig::default().with_workers(1).with_shard_size(7),
        MiningConfig::default().with_workers(3).with_shard_size(13),
        MiningConfig::default().with_workers(0).with_shard_size(64),
        MiningConfig::default().with_workers(4).with_shard_size(1),
    ];
    for config in configs {
        let label = format!("workers={} shard={}", config.workers, config.shard_size);
        let value = serde_json::to_value(run(config, ids.clone())).unwrap();
        assert_eq!(value, baseline, "{}", label);
    }
}

#[test]
fn test_percentages_and_limits() {
    let config = MiningConfig {
        top_k: 5,
        max_sample_lines: 3,
        ..Default::default()
    };
    let analysis = run(config, generated_identifiers(600));

    for report in analysis.sorted_reports() {
        if report.kind != ReportKind::TestMethodNaming {
            assert!(report.items().len() <= 5, "{} too long", report.kind);
        }
        for item in report.items() {
            assert!(
                (0.0..=1.0).contains(&item.percent()),
                "{} / {} out of range",
                report.kind,
                item.name
            );
            assert!(item.sample.lines().count() <= 3);
        }
        let counts: Vec<u64> = report.items().iter().map(|i| i.count).collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted, "{} not ranked", report.kind);
    }
}

#[test]
fn test_reports_in_precedence_order() {
    let mut extensions = BTreeMap::new();
    extensions.insert("java".to_string(), 6);
    extensions.insert("xml".to_string(), 3);
    extensions.insert("(no-ext)".to_string(), 1);
    let scan = ScanSummary {
        total_files: 10,
        extension_counts: extensions,
        source_files: 4,
        test_files: 3,
    };

    let analysis = Analyzer::default()
        .run(
            AnalysisInput::new("demo", fixture_identifiers()).with_scan(scan),
            &RunContext::new(),
        )
        .unwrap();

    let order: Vec<ReportKind> = analysis.sorted_reports().iter().map(|r| r.kind).collect();
    assert_eq!(order, ReportKind::all().to_vec());

    let file_types = analysis.report(ReportKind::FileTypes).unwrap();
    assert_eq!(file_types.items()[0].name, "java");
    assert!((file_types.items()[0].percent() - 0.6).abs() < 1e-9);
    let src_vs_test = analysis.report(ReportKind::SrcVsTest).unwrap();
    assert_eq!(src_vs_test.get("Tests").unwrap().count, 3);
}

#[test]
fn test_json_output_shape() {
    let analysis = run(MiningConfig::default(), fixture_identifiers());
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["project_label"], "demo");
    let tokens = &json["reports"]["TOKENS"];
    assert_eq!(tokens["kind"], "TOKENS");
    assert_eq!(tokens["version"], 1);
    assert_eq!(tokens["items"][0]["name"], "when");
    assert!(json["convention"]["headline"].is_string());
}

#[test]
fn test_pretty_summary() {
    let analysis = run(MiningConfig::default(), fixture_identifiers());
    let text = analysis.pretty_summary();
    assert!(text.starts_with("Project: demo\n\n"));
    assert!(text.contains("De-facto convention:\n"));
    assert!(text.contains("Most likely name: should return order when id exists"));
}

#[test]
fn test_config_file_shapes_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("naming-miner.toml"),
        "top_k = 2\npattern_mode = \"granular\"\nanalyzed_population = \"unit\"\n",
    )
    .unwrap();
    let config = load_mining_config(dir.path());
    assert_eq!(config.top_k, 2);

    let ids = vec![
        Identifier::new("shouldReturnTrue").with_population("unit"),
        Identifier::new("shouldReturnFalse").with_population("unit"),
        Identifier::new("ignoredByPopulation").with_population("test"),
    ];
    let analysis = run(config, ids);

    let naming = analysis.report(ReportKind::TestMethodNaming).unwrap();
    assert_eq!(naming.total_count(), 2);
    let tokens = analysis.report(ReportKind::Tokens).unwrap();
    assert_eq!(tokens.items().len(), 2);
    assert_eq!(tokens.total_count(), 6);
    let patterns = analysis.report(ReportKind::Patterns).unwrap();
    assert!(patterns.summary.contains("granular"));
    assert_eq!(patterns.items()[0].name, "Should Return <w>");
}

#[test]
fn test_untagged_identifiers_are_analyzed() {
    let ids = vec![Identifier::new("shouldWork"), Identifier::new("itWorks")];
    let analysis = run(MiningConfig::default(), ids);
    assert_eq!(
        analysis
            .report(ReportKind::Summary)
            .unwrap()
            .get("Analyzed")
            .unwrap()
            .count,
        2
    );
}

#[test]
fn test_fatal_conditions() {
    let analyzer = Analyzer::default();

    let err = analyzer
        .run(AnalysisInput::new("", fixture_identifiers()), &RunContext::new())
        .unwrap_err();
    assert!(matches!(err, MiningError::EmptyProjectLabel));

    let only_sources = vec![source_method("UserService", "save")];
    let err = analyzer
        .run(AnalysisInput::new("demo", only_sources), &RunContext::new())
        .unwrap_err();
    assert!(matches!(err, MiningError::NoIdentifiers { .. }));
    assert_eq!(err.to_string(), "No identifiers found in population 'test'");

    let token = CancellationToken::new();
    let ctx = RunContext::new().with_cancellation(token.clone());
    token.cancel();
    let err = analyzer
        .run(AnalysisInput::new("demo", generated_identifiers(100)), &ctx)
        .unwrap_err();
    assert!(matches!(err, MiningError::Cancelled));
}

/// Run a large input and cancel as soon as the first per-identifier
/// progress step arrives.
fn run_cancelled_after_first_step(workers: usize) -> Result<ProjectAnalysis, MiningError> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let token = CancellationToken::new();
    let ctx = RunContext::new()
        .with_progress(tx)
        .with_cancellation(token.clone());

    let watcher = std::thread::spawn(move || {
        for progress in rx.iter() {
            if progress.current.is_some() {
                token.cancel();
                break;
            }
        }
    });

    let config = MiningConfig::default()
        .with_workers(workers)
        .with_shard_size(1);
    let input = AnalysisInput::new("demo", generated_identifiers(200_000));
    let result = Analyzer::new(config).run(input, &ctx);

    drop(ctx);
    watcher.join().unwrap();
    result
}

#[test]
fn test_cancel_between_identifiers_sequential() {
    let result = run_cancelled_after_first_step(1);
    assert!(matches!(result, Err(MiningError::Cancelled)));
}

#[test]
fn test_cancel_between_identifiers_parallel() {
    let result = run_cancelled_after_first_step(4);
    assert!(matches!(result, Err(MiningError::Cancelled)));
}

#[test]
fn test_zero_min_anchors_counts_anchor_free_names() {
    let config = MiningConfig {
        min_anchors: 0,
        ..Default::default()
    };
    let ids = vec![
        test_method("UserServiceTest", "loadUserProfile"),
        test_method("UserServiceTest", "shouldSave"),
    ];
    let analysis = run(config, ids);

    let patterns = analysis.report(ReportKind::Patterns).unwrap();
    assert_eq!(patterns.total_count(), 2);
    let anchor_free = patterns.get("<any>").unwrap();
    assert_eq!(anchor_free.count, 1);
    assert_eq!(anchor_free.sample, "loadUserProfile");
    assert!((anchor_free.percent() - 0.5).abs() < 1e-9);
}

#[test]
fn test_inconsistent_scan_keeps_percentages_bounded() {
    let mut extensions = BTreeMap::new();
    extensions.insert("java".to_string(), 40);
    let scan = ScanSummary {
        total_files: 10,
        extension_counts: extensions,
        source_files: 30,
        test_files: 0,
    };

    let analysis = Analyzer::default()
        .run(
            AnalysisInput::new("demo", fixture_identifiers()).with_scan(scan),
            &RunContext::new(),
        )
        .unwrap();

    for kind in [ReportKind::FileTypes, ReportKind::SrcVsTest] {
        let report = analysis.report(kind).unwrap();
        assert!(report
            .items()
            .iter()
            .all(|i| (0.0..=1.0).contains(&i.percent())));
    }
}
