//! Aggregate accuracy summary assembly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use gt_core::{AccuracyCollector, ConfusionMatrix, EntityStats, OverallStats};

/// A full accuracy summary, ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// When this summary was assembled.
    pub generated_at: DateTime<Utc>,
    /// Number of recorded ground-truth events.
    pub event_count: usize,
    /// Number of recorded classification attempts.
    pub classification_count: usize,
    pub overall_stats: OverallStats,
    pub per_entity_stats: BTreeMap<String, EntityStats>,
    pub confusion_matrix: ConfusionMatrix,
}

/// Assembles the aggregate summary for the collector's current contents.
///
/// Takes `&mut` because building the confusion matrix may sort pending
/// timeline events.
pub fn build_summary(collector: &mut AccuracyCollector) -> Summary {
    Summary {
        generated_at: Utc::now(),
        event_count: collector.event_count(),
        classification_count: collector.classification_count(),
        overall_stats: collector.overall_stats(),
        per_entity_stats: collector.per_entity_stats(),
        confusion_matrix: collector.confusion_matrix(),
    }
}
