//! Accuracy statistics over the classification log.
//!
//! Per-category metrics resolve ground truth once per record, so the whole
//! breakdown costs one pass with one timeline lookup each instead of a rescan
//! per category.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::timeline::Timeline;
use crate::types::ClassificationRecord;

/// Aggregate accuracy over all classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    /// Number of classification attempts.
    pub total: usize,
    /// Attempts the caller judged correct.
    pub correct: usize,
    /// `correct / total`, 0.0 when the log is empty.
    pub accuracy: f64,
    /// Mean of all recorded confidences.
    pub confidence_mean: f64,
    /// Population standard deviation of all recorded confidences.
    pub confidence_std: f64,
}

/// Precision/recall/F1 breakdown for one category label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Attempts that predicted this label.
    pub total_predictions: usize,
    /// Same as `true_positives`, kept for report consumers.
    pub correct_predictions: usize,
    /// Mean confidence of attempts that predicted this label.
    pub avg_confidence: f64,
}

/// Accuracy summary for one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityStats {
    pub total: usize,
    pub correct: usize,
    /// `correct / total`, 0.0 when the entity has no attempts.
    pub accuracy: f64,
    pub avg_confidence: f64,
}

/// Running tally for one category label during the single pass.
#[derive(Debug, Default)]
struct CategoryTally {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
    predictions: usize,
    confidence_sum: f64,
}

impl CategoryTally {
    fn into_stats(self) -> CategoryStats {
        let precision = ratio(self.true_positives, self.true_positives + self.false_positives);
        let recall = ratio(self.true_positives, self.true_positives + self.false_negatives);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        CategoryStats {
            precision,
            recall,
            f1,
            true_positives: self.true_positives,
            false_positives: self.false_positives,
            false_negatives: self.false_negatives,
            total_predictions: self.predictions,
            correct_predictions: self.true_positives,
            avg_confidence: if self.predictions == 0 {
                0.0
            } else {
                self.confidence_sum / to_f64(self.predictions)
            },
        }
    }
}

/// Computes aggregate accuracy over the whole log.
///
/// An empty log yields the zeroed default rather than an error.
pub fn overall(records: &[ClassificationRecord]) -> OverallStats {
    if records.is_empty() {
        return OverallStats::default();
    }

    let total = records.len();
    let correct = records.iter().filter(|r| r.is_correct).count();
    let confidences: Vec<f64> = records.iter().map(|r| r.confidence).collect();
    let confidence_mean = mean(&confidences);

    OverallStats {
        total,
        correct,
        accuracy: ratio(correct, total),
        confidence_mean,
        confidence_std: population_std(&confidences, confidence_mean),
    }
}

/// Computes per-category precision, recall and F1 in a single pass.
///
/// Ground truth is resolved once per record at the record's own timestamp.
/// The result covers every label seen as a prediction or as ground truth,
/// with absent categories counting under the nominal label. A record whose
/// entity has no ground-truth history contributes its predicted label only;
/// there is no known category to attribute a miss to.
pub fn per_category(
    timeline: &mut Timeline,
    records: &[ClassificationRecord],
) -> BTreeMap<String, CategoryStats> {
    let mut tallies: BTreeMap<String, CategoryTally> = BTreeMap::new();

    for record in records {
        let predicted = record.predicted_label();
        let actual = timeline.lookup(&record.entity_id, record.timestamp_s);

        let tally = tallies.entry(predicted.to_string()).or_default();
        if record.is_correct {
            tally.true_positives += 1;
        } else {
            tally.false_positives += 1;
        }
        tally.predictions += 1;
        tally.confidence_sum += record.confidence;

        if let Some(actual_label) = actual.known_label() {
            let missed = !record.is_correct && actual_label != predicted;
            let tally = tallies.entry(actual_label.to_string()).or_default();
            if missed {
                tally.false_negatives += 1;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(label, tally)| (label, tally.into_stats()))
        .collect()
}

/// Groups accuracy by entity.
pub fn per_entity(records: &[ClassificationRecord]) -> BTreeMap<String, EntityStats> {
    let mut grouped: BTreeMap<String, (usize, usize, f64)> = BTreeMap::new();

    for record in records {
        let (total, correct, confidence_sum) =
            grouped.entry(record.entity_id.clone()).or_default();
        *total += 1;
        if record.is_correct {
            *correct += 1;
        }
        *confidence_sum += record.confidence;
    }

    grouped
        .into_iter()
        .map(|(entity_id, (total, correct, confidence_sum))| {
            let stats = EntityStats {
                total,
                correct,
                accuracy: ratio(correct, total),
                avg_confidence: if total == 0 {
                    0.0
                } else {
                    confidence_sum / to_f64(total)
                },
            };
            (entity_id, stats)
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / to_f64(values.len())
    }
}

/// Population standard deviation: the log is the whole population, not a
/// sample of a larger one.
fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / to_f64(values.len());
    variance.sqrt()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        to_f64(numerator) / to_f64(denominator)
    }
}

// Counts stay far below 2^53, where this conversion is exact.
#[allow(clippy::cast_precision_loss)]
const fn to_f64(count: usize) -> f64 {
    count as f64
}
