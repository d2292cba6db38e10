#![deny(unsafe_code)]

pub mod csv_table;
pub mod frame;
pub mod polars_utils;

pub use csv_table::{CsvTable, read_csv_table};
pub use frame::{build_frame, load_dataset};
pub use polars_utils::{
    any_to_f64, any_to_string, column_value_f64, column_value_string, format_numeric,
    is_numeric_dtype, parse_f64,
};
