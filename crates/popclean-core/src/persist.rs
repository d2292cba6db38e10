//! Persister: all-or-nothing CSV checkpoint writing.
//!
//! Each checkpoint is written to a temp file in the destination
//! directory and atomically renamed into place, so a failed run never
//! leaves a partially written checkpoint behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use popclean_ingest::any_to_string;
use popclean_model::{CleanError, Result};

fn render_rows(df: &DataFrame, path: &Path, out: impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer
        .write_record(&headers)
        .map_err(|error| CleanError::write(path, error))?;
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(&column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        writer
            .write_record(&record)
            .map_err(|error| CleanError::write(path, error))?;
    }
    writer
        .flush()
        .map_err(|error| CleanError::write(path, error))?;
    Ok(())
}

/// Write the table as a CSV checkpoint. Nulls become empty cells,
/// matching the load-time convention so the checkpoint re-loads
/// losslessly.
pub fn write_checkpoint(df: &DataFrame, path: &Path) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp = tempfile::NamedTempFile::new_in(&dir)
        .map_err(|error| CleanError::write(path, error))?;
    render_rows(df, path, &temp)?;
    temp.persist(path)
        .map_err(|error| CleanError::write(path, error))?;
    info!(path = %path.display(), rows = df.height(), "wrote checkpoint");
    Ok(path.to_path_buf())
}
