//! End-to-end tests for the full validation flow:
//! record ground truth → record classifications → query stats → export.

use std::collections::BTreeMap;

use tempfile::TempDir;

use gt_core::{AccuracyCollector, GroundTruth};
use gt_report::{ExportConfig, build_summary, export_tabular};

/// Builds a collector covering two entities over a short scenario.
fn scenario_collector() -> AccuracyCollector {
    let mut collector = AccuracyCollector::new();

    // SAT-1 runs nominal, then develops a thermal fault at t=10.
    collector.record_ground_truth("SAT-1", 0.0, None, 1.0).unwrap();
    collector
        .record_ground_truth("SAT-1", 10.0, Some("thermal"), 1.0)
        .unwrap();

    // SAT-2 has a power fault from the start.
    collector
        .record_ground_truth("SAT-2", 0.0, Some("power"), 1.0)
        .unwrap();

    // Classifier output as judged by the evaluation harness.
    collector
        .record_classification("SAT-1", 5.0, None, 0.9, true)
        .unwrap();
    collector
        .record_classification("SAT-1", 15.0, Some("thermal"), 0.85, true)
        .unwrap();
    collector
        .record_classification("SAT-2", 5.0, None, 0.4, false)
        .unwrap();
    collector
        .record_classification("SAT-2", 20.0, Some("power"), 0.95, true)
        .unwrap();

    collector
}

#[test]
fn point_in_time_lookups_follow_the_scenario() {
    let mut collector = scenario_collector();

    assert_eq!(collector.ground_truth_at("SAT-1", 5.0), GroundTruth::Nominal);
    assert_eq!(
        collector.ground_truth_at("SAT-1", 15.0),
        GroundTruth::Category("thermal".into())
    );
    assert_eq!(
        collector.ground_truth_at("SAT-2", 100.0),
        GroundTruth::Category("power".into())
    );
    // Never-seen entity: no ground truth, not nominal.
    assert_eq!(collector.ground_truth_at("SAT-3", 5.0), GroundTruth::Unknown);
}

#[test]
fn statistics_agree_across_views() {
    let mut collector = scenario_collector();

    let overall = collector.overall_stats();
    assert_eq!(overall.total, 4);
    assert_eq!(overall.correct, 3);
    assert!((overall.accuracy - 0.75).abs() < 1e-12);

    let by_category = collector.per_category_stats();
    let thermal = &by_category["thermal"];
    assert!((thermal.precision - 1.0).abs() < 1e-12);
    assert!((thermal.recall - 1.0).abs() < 1e-12);
    assert!((thermal.f1 - 1.0).abs() < 1e-12);

    // The missed SAT-2 fault shows up as a power false negative and a
    // nominal false positive.
    assert_eq!(by_category["power"].false_negatives, 1);
    assert_eq!(by_category["nominal"].false_positives, 1);

    let by_entity = collector.per_entity_stats();
    assert_eq!(by_entity["SAT-1"].correct, 2);
    assert_eq!(by_entity["SAT-2"].correct, 1);
    let attempts: usize = by_entity.values().map(|s| s.total).sum();
    assert_eq!(attempts, overall.total);

    let matrix = collector.confusion_matrix();
    assert_eq!(matrix["nominal"]["nominal"], 1);
    assert_eq!(matrix["nominal"]["power"], 1);
    assert_eq!(matrix["thermal"]["thermal"], 1);
    assert_eq!(matrix["power"]["power"], 1);
    let cells: usize = matrix.values().flat_map(BTreeMap::values).sum();
    assert_eq!(cells, collector.classification_count());
}

#[test]
fn summary_and_export_cover_every_attempt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/report.csv");
    let mut collector = scenario_collector();

    let summary = build_summary(&mut collector);
    assert_eq!(summary.event_count, 3);
    assert_eq!(summary.classification_count, 4);

    export_tabular(&collector, &path, &ExportConfig::default()).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();

    // Header plus one row per classification.
    assert_eq!(contents.lines().count(), 1 + summary.classification_count);
    assert!(contents.starts_with("timestamp,entity_id,predicted_category,confidence,is_correct"));
}

#[test]
fn reset_behaves_like_a_new_collector() {
    let mut collector = scenario_collector();
    collector.reset();

    let mut fresh = AccuracyCollector::new();
    assert_eq!(collector.overall_stats(), fresh.overall_stats());
    assert_eq!(collector.per_category_stats(), fresh.per_category_stats());
    assert_eq!(collector.confusion_matrix(), fresh.confusion_matrix());

    let summary = build_summary(&mut collector);
    assert_eq!(summary.event_count, 0);
    assert_eq!(summary.classification_count, 0);
}
