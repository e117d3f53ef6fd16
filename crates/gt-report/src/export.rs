//! Tabular export of classification attempts.

use std::borrow::Cow;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use gt_core::AccuracyCollector;

/// Export failures.
///
/// The collector's in-memory state is never affected by a failed export; a
/// partially written file may remain at the destination.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options for tabular export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Field delimiter. Default: `,`.
    pub delimiter: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Writes one row per recorded classification to `path`.
///
/// Columns are `timestamp,entity_id,predicted_category,confidence,is_correct`,
/// with absent predictions written as nominal. Missing parent directories are
/// created. The writer is dropped, and the file closed, on every exit path;
/// an explicit flush surfaces buffered write errors before returning.
pub fn export_tabular(
    collector: &AccuracyCollector,
    path: &Path,
    config: &ExportConfig,
) -> Result<(), ExportError> {
    let io = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io)?;
    }

    let file = fs::File::create(path).map_err(io)?;
    let mut writer = BufWriter::new(file);

    let d = config.delimiter;
    writeln!(
        writer,
        "timestamp{d}entity_id{d}predicted_category{d}confidence{d}is_correct"
    )
    .map_err(io)?;

    for record in collector.classifications() {
        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}{d}{}",
            record.timestamp_s,
            field(&record.entity_id, d),
            field(record.predicted_label(), d),
            record.confidence,
            record.is_correct,
        )
        .map_err(io)?;
    }

    writer.flush().map_err(io)?;
    info!(
        path = %path.display(),
        rows = collector.classification_count(),
        "wrote tabular report"
    );
    Ok(())
}

/// Quotes a field when it contains the delimiter, a quote, or a newline.
fn field(value: &str, delimiter: char) -> Cow<'_, str> {
    if value.contains(&[delimiter, '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
