//! The collector owning all recorded ground truth and classifications.

use std::collections::BTreeMap;

use crate::confusion::{self, ConfusionMatrix};
use crate::log::ClassificationLog;
use crate::stats::{self, CategoryStats, EntityStats, OverallStats};
use crate::timeline::Timeline;
use crate::types::{ClassificationRecord, GroundTruth, ValidationError};

/// Owns the ground-truth timeline and classification log and answers
/// accuracy queries over them.
///
/// Every operation is a bounded, synchronous, in-memory computation.
/// Queries that resolve ground truth take `&mut self` because a dirty
/// timeline sorts in place on first lookup; callers sharing a collector
/// across threads must serialize access externally. No external component
/// holds references into the internal lists or caches.
#[derive(Debug, Default)]
pub struct AccuracyCollector {
    timeline: Timeline,
    log: ClassificationLog,
}

impl AccuracyCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the authoritative category for an entity at a point in time.
    ///
    /// `category: None` records that the entity was nominal. Ground-truth
    /// confidence is 1.0 by convention; the parameter is carried through for
    /// harnesses that weight their scenarios.
    pub fn record_ground_truth(
        &mut self,
        entity_id: &str,
        timestamp_s: f64,
        category: Option<&str>,
        confidence: f64,
    ) -> Result<(), ValidationError> {
        self.timeline.record(entity_id, timestamp_s, category, confidence)
    }

    /// Records one prediction attempt by the external classifier.
    ///
    /// `is_correct` is the caller's judgment and is stored as supplied.
    pub fn record_classification(
        &mut self,
        entity_id: &str,
        timestamp_s: f64,
        predicted_category: Option<&str>,
        confidence: f64,
        is_correct: bool,
    ) -> Result<(), ValidationError> {
        self.log
            .record(entity_id, timestamp_s, predicted_category, confidence, is_correct)
    }

    /// The ground truth in effect for an entity at a point in time.
    pub fn ground_truth_at(&mut self, entity_id: &str, timestamp_s: f64) -> GroundTruth {
        self.timeline.lookup(entity_id, timestamp_s)
    }

    /// Aggregate accuracy over all recorded classifications.
    #[must_use]
    pub fn overall_stats(&self) -> OverallStats {
        stats::overall(self.log.records())
    }

    /// Per-category precision, recall and F1.
    pub fn per_category_stats(&mut self) -> BTreeMap<String, CategoryStats> {
        stats::per_category(&mut self.timeline, self.log.records())
    }

    /// Accuracy grouped by entity.
    #[must_use]
    pub fn per_entity_stats(&self) -> BTreeMap<String, EntityStats> {
        stats::per_entity(self.log.records())
    }

    /// Confusion matrix of predicted versus actual categories.
    pub fn confusion_matrix(&mut self) -> ConfusionMatrix {
        confusion::build(&mut self.timeline, self.log.records())
    }

    /// Number of recorded ground-truth events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.timeline.event_count()
    }

    /// Number of recorded classification attempts.
    #[must_use]
    pub fn classification_count(&self) -> usize {
        self.log.count()
    }

    /// All recorded classification attempts, in insertion order.
    #[must_use]
    pub fn classifications(&self) -> &[ClassificationRecord] {
        self.log.records()
    }

    /// Number of classification attempts, matching [`classifications`](Self::classifications).
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Clears all recorded data.
    ///
    /// Every subsequent query behaves exactly as on a freshly constructed
    /// collector.
    pub fn reset(&mut self) {
        self.timeline.clear();
        self.log.clear();
        tracing::debug!("accuracy collector reset");
    }
}
