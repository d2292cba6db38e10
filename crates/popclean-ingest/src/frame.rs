//! CSV-to-DataFrame bridge with per-column type detection.
//!
//! A column whose non-empty cells all parse as `f64` becomes a
//! `Float64` series; every other column becomes a `String` series.
//! Empty cells are nulls in either case.

use std::path::Path;

use polars::prelude::{Column, DataFrame};
use tracing::{error, info};

use popclean_model::{CleanError, Result, Stage};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::polars_utils::parse_f64;

fn numeric_column(cells: &[&str]) -> Option<Vec<Option<f64>>> {
    let mut values = Vec::with_capacity(cells.len());
    let mut non_empty = 0usize;
    for cell in cells {
        if cell.is_empty() {
            values.push(None);
        } else {
            non_empty += 1;
            values.push(Some(parse_f64(cell)?));
        }
    }
    if non_empty == 0 {
        return None;
    }
    Some(values)
}

fn string_column(cells: &[&str]) -> Vec<Option<String>> {
    cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                None
            } else {
                Some((*cell).to_string())
            }
        })
        .collect()
}

/// Build a typed `DataFrame` from an untyped [`CsvTable`].
pub fn build_frame(table: &CsvTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    for (col_idx, name) in table.headers.iter().enumerate() {
        let cells: Vec<&str> = table
            .rows
            .iter()
            .map(|row| row[col_idx].as_str())
            .collect();
        let column = match numeric_column(&cells) {
            Some(values) => Column::new(name.as_str().into(), values),
            None => Column::new(name.as_str().into(), string_column(&cells)),
        };
        columns.push(column);
    }
    DataFrame::new(columns).map_err(CleanError::frame)
}

/// Load a raw dataset: read the CSV source and bridge it into a typed
/// frame. This is the pipeline's only input suspension point. Success
/// and failure both land in the log stream.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let df = match read_csv_table(path).and_then(|table| build_frame(&table)) {
        Ok(df) => df,
        Err(error) => {
            error!(
                stage = %Stage::Load,
                path = %path.display(),
                %error,
                "load failed"
            );
            return Err(error);
        }
    };
    info!(
        stage = %Stage::Load,
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::io::Write;

    fn table(headers: &[&str], rows: &[&[&str]]) -> CsvTable {
        CsvTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn numeric_columns_become_float64_with_nulls() {
        let df = build_frame(&table(
            &["population", "income_groups"],
            &[&["100", "Low"], &["", "High"], &["2.5", ""]],
        ))
        .expect("build frame");
        let population = df.column("population").expect("population column");
        assert_eq!(population.dtype(), &DataType::Float64);
        assert_eq!(population.null_count(), 1);
        let income = df.column("income_groups").expect("income column");
        assert_eq!(income.dtype(), &DataType::String);
        assert_eq!(income.null_count(), 1);
    }

    #[test]
    fn mixed_content_stays_text() {
        let df = build_frame(&table(&["x"], &[&["1"], &["abc"]])).expect("build frame");
        assert_eq!(df.column("x").expect("x").dtype(), &DataType::String);
    }

    #[test]
    fn all_empty_column_stays_text() {
        let df = build_frame(&table(&["x"], &[&[""], &[""]])).expect("build frame");
        let x = df.column("x").expect("x");
        assert_eq!(x.dtype(), &DataType::String);
        assert_eq!(x.null_count(), 2);
    }

    #[test]
    fn load_dataset_reads_csv_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"income_groups,gender,year,population\nLow,1,2023,100\n")
            .expect("write csv");
        let df = load_dataset(file.path()).expect("load dataset");
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 4);
    }
}
