//! Polars `AnyValue` conversion helpers shared across the workspace.

use polars::prelude::{AnyValue, DataFrame, DataType};

/// Converts an `AnyValue` to its output string form. Nulls become the
/// empty string, floats are printed without trailing zeros so that a
/// persisted checkpoint re-loads with the same typing.
pub fn any_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(v) => (*v).to_string(),
        AnyValue::StringOwned(v) => v.to_string(),
        AnyValue::Float64(v) => format_numeric(*v),
        AnyValue::Float32(v) => format_numeric(f64::from(*v)),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::Boolean(v) => if *v { "1" } else { "0" }.to_string(),
        other => other.to_string(),
    }
}

/// Formats a float without a trailing `.0` for integral values.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for nulls and
/// non-numeric content.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float64(v) => Some(*v),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::String(v) => parse_f64(v),
        AnyValue::StringOwned(v) => parse_f64(v),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for empty or invalid input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// True for the numeric dtypes the pipeline produces or accepts.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

/// Cell accessor as an output string; empty string for nulls or an
/// absent column.
pub fn column_value_string(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(column) => any_to_string(&column.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

/// Cell accessor as `f64`; `None` for nulls or an absent column.
pub fn column_value_f64(df: &DataFrame, name: &str, idx: usize) -> Option<f64> {
    let column = df.column(name).ok()?;
    any_to_f64(&column.get(idx).unwrap_or(AnyValue::Null))
}
