//! Core type definitions with boundary validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used when a prediction or ground-truth event carries no category.
pub const NOMINAL_LABEL: &str = "nominal";

/// Label reported when an entity has no ground-truth history at the query time.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Validation errors raised at the recording boundary.
///
/// A failed record call stores nothing; the collector is unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A numeric input was NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// Rejects NaN and infinite inputs at the recording boundary.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

/// The ground truth in effect for an entity at a point in time.
///
/// `Unknown` means the entity has no recorded event at or before the query
/// time. This is distinct from `Nominal`: an entity with no history has no
/// known ground truth, not a known-good state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroundTruth {
    /// No ground-truth event exists at or before the query time.
    Unknown,
    /// The effective event recorded no category.
    Nominal,
    /// The effective event recorded the named category.
    Category(String),
}

impl GroundTruth {
    /// Returns the label for this ground truth.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Unknown => UNKNOWN_LABEL,
            Self::Nominal => NOMINAL_LABEL,
            Self::Category(name) => name,
        }
    }

    /// Returns the category label, or `None` when no ground truth is known.
    ///
    /// `Nominal` maps to [`NOMINAL_LABEL`]. Callers attributing misses use
    /// this to skip entities that have no history to be missed against.
    #[must_use]
    pub fn known_label(&self) -> Option<&str> {
        match self {
            Self::Unknown => None,
            Self::Nominal => Some(NOMINAL_LABEL),
            Self::Category(name) => Some(name),
        }
    }
}

impl fmt::Display for GroundTruth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An authoritative ground-truth event for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthEvent {
    /// Scenario time in seconds.
    pub timestamp_s: f64,
    /// The entity this event describes.
    pub entity_id: String,
    /// Expected category; `None` means the entity was nominal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_category: Option<String>,
    /// Ground-truth confidence, 1.0 by convention.
    pub confidence: f64,
}

/// One prediction attempt by an external classifier.
///
/// `is_correct` is supplied by the caller and stored as given. Correctness
/// may be judged with partial credit by the evaluation harness, so it is
/// never recomputed here from predicted versus actual categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Scenario time in seconds.
    pub timestamp_s: f64,
    /// The entity the prediction was made for.
    pub entity_id: String,
    /// Predicted category; `None` means a nominal prediction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_category: Option<String>,
    /// The classifier's confidence, expected in \[0.0, 1.0\].
    pub confidence: f64,
    /// The caller's correctness judgment.
    pub is_correct: bool,
}

impl ClassificationRecord {
    /// The predicted label, with an absent category reading as nominal.
    #[must_use]
    pub fn predicted_label(&self) -> &str {
        self.predicted_category.as_deref().unwrap_or(NOMINAL_LABEL)
    }
}
