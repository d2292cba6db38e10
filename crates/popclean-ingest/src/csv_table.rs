//! Raw CSV reading into an untyped string table.
//!
//! The reader normalizes headers and cells (BOM and surrounding
//! whitespace stripped) and skips fully empty records. Typing happens
//! later in [`crate::frame`].

use std::path::Path;

use csv::ReaderBuilder;

use popclean_model::{CleanError, Result};

/// An untyped table: one header row plus string cells.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn parse_error(path: &Path, message: impl std::fmt::Display) -> CleanError {
    CleanError::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Read a delimited source into a [`CsvTable`].
///
/// Fails with [`CleanError::NotFound`] if the path does not exist and
/// [`CleanError::Parse`] on malformed content or an empty header row.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    if !path.exists() {
        return Err(CleanError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| parse_error(path, error))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| parse_error(path, error))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(parse_error(path, "missing header row"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| parse_error(path, error))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        // Short records are padded with empty cells, long ones truncated
        // to the header width.
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}
