//! Predicted-by-actual confusion counts.

use std::collections::{BTreeMap, HashMap};

use crate::timeline::Timeline;
use crate::types::{ClassificationRecord, GroundTruth, NOMINAL_LABEL};

/// Confusion counts keyed by predicted label, then actual label.
///
/// Absent keys mean a count of zero.
pub type ConfusionMatrix = BTreeMap<String, BTreeMap<String, usize>>;

/// Builds the confusion matrix of predicted versus actual categories.
///
/// Absent predictions and absent ground-truth categories both count under
/// the nominal label. An entity with no ground-truth history folds into
/// nominal too: the matrix carries no separate unknown bucket, so true
/// negatives can be undercounted for entities classified before their first
/// recorded event. Callers needing that distinction should resolve ground
/// truth through [`Timeline::lookup`] directly.
///
/// Ground-truth lookups are cached per (entity, timestamp) pair so repeated
/// classifications at the same instant cost one binary search. The cache
/// never changes the counts versus an uncached pass.
pub fn build(timeline: &mut Timeline, records: &[ClassificationRecord]) -> ConfusionMatrix {
    // Timestamps are validated finite at the recording boundary, so keying
    // on the raw bit pattern is sound.
    let mut cache: HashMap<(String, u64), GroundTruth> = HashMap::new();
    let mut matrix = ConfusionMatrix::new();

    for record in records {
        let key = (record.entity_id.clone(), record.timestamp_s.to_bits());
        let actual = cache
            .entry(key)
            .or_insert_with(|| timeline.lookup(&record.entity_id, record.timestamp_s));

        let actual_label = match actual {
            GroundTruth::Category(name) => name.as_str(),
            GroundTruth::Nominal | GroundTruth::Unknown => NOMINAL_LABEL,
        };

        *matrix
            .entry(record.predicted_label().to_string())
            .or_default()
            .entry(actual_label.to_string())
            .or_insert(0) += 1;
    }

    matrix
}
