//! Append-only record of classification attempts.

use crate::types::{ClassificationRecord, ValidationError, ensure_finite};

/// Append-only log of classifier predictions.
///
/// Records are never mutated or removed individually; the log only grows
/// until an explicit [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct ClassificationLog {
    records: Vec<ClassificationRecord>,
}

impl ClassificationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classification attempt.
    ///
    /// Confidence is expected in \[0.0, 1.0\] but out-of-range values are
    /// stored as given; the boundary only rejects empty ids and non-finite
    /// numbers. Callers own the validity of their inputs.
    pub fn record(
        &mut self,
        entity_id: &str,
        timestamp_s: f64,
        predicted_category: Option<&str>,
        confidence: f64,
        is_correct: bool,
    ) -> Result<(), ValidationError> {
        if entity_id.is_empty() {
            return Err(ValidationError::Empty { field: "entity_id" });
        }
        ensure_finite("timestamp_s", timestamp_s)?;
        ensure_finite("confidence", confidence)?;

        if !(0.0..=1.0).contains(&confidence) {
            tracing::warn!(entity_id, confidence, "classification confidence outside [0, 1]");
        }

        self.records.push(ClassificationRecord {
            timestamp_s,
            entity_id: entity_id.to_string(),
            predicted_category: predicted_category.map(String::from),
            confidence,
            is_correct,
        });
        Ok(())
    }

    /// Number of recorded classification attempts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All recorded attempts, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ClassificationRecord] {
        &self.records
    }

    /// Removes every recorded attempt.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
