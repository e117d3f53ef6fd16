//! Ground-truth accuracy validation for classifier evaluation.
//!
//! This crate answers "how accurate was the classifier" against an
//! authoritative record of what actually happened:
//! - [`Timeline`]: per-entity ground-truth events with point-in-time lookup
//! - [`ClassificationLog`]: append-only record of prediction attempts
//! - [`stats`]: overall accuracy, per-category precision/recall/F1, and
//!   per-entity breakdowns
//! - [`confusion`]: predicted-by-actual count matrix
//!
//! [`AccuracyCollector`] ties these together behind one recording and query
//! surface. Correctness judgments are supplied by the caller at recording
//! time; this crate aggregates them but never re-derives them.

mod collector;
pub mod confusion;
mod log;
pub mod stats;
mod timeline;
mod types;

pub use collector::AccuracyCollector;
pub use confusion::ConfusionMatrix;
pub use log::ClassificationLog;
pub use stats::{CategoryStats, EntityStats, OverallStats};
pub use timeline::Timeline;
pub use types::{
    ClassificationRecord, GroundTruth, GroundTruthEvent, NOMINAL_LABEL, UNKNOWN_LABEL,
    ValidationError,
};
