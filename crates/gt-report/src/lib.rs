//! Reporting over a [`gt_core::AccuracyCollector`].
//!
//! Two consumers are served here: [`export_tabular`] writes one delimited
//! row per classification attempt for offline analysis, and
//! [`build_summary`] assembles the aggregate statistics into a single
//! serializable structure.

mod export;
mod summary;

pub use export::{ExportConfig, ExportError, export_tabular};
pub use summary::{Summary, build_summary};
