//! Human-readable rendering of the exploration report.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use popclean_ingest::format_numeric;

use crate::summary::{ColumnSummary, ExplorationReport};

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.into_iter().map(Cell::new).collect::<Vec<_>>());
    table
}

fn align_right(table: &mut Table, columns: std::ops::Range<usize>) {
    for idx in columns {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Print the exploration report to stdout.
pub fn print_report(report: &ExplorationReport) {
    println!(
        "Dataset: {} rows x {} columns, {} duplicate row(s), {} entr(ies) with year beyond the ceiling",
        report.rows, report.columns, report.duplicate_rows, report.future_years
    );
    if !report.income_group_values.is_empty() {
        println!(
            "income_groups values: {}",
            report.income_group_values.join(", ")
        );
    }
    if !report.negative_rows.is_empty() {
        println!(
            "Rows with negative numeric values: {:?}",
            report.negative_rows
        );
    }

    let mut numeric = base_table(vec![
        "Column", "Count", "Mean", "Std", "Min", "Q1", "Median", "Q3", "Max",
    ]);
    align_right(&mut numeric, 1..9);
    let mut categorical = base_table(vec!["Column", "Count", "Unique", "Mode", "Top counts"]);
    align_right(&mut categorical, 1..3);

    for (name, summary) in &report.column_summaries {
        match summary {
            ColumnSummary::Numeric(stats) => {
                numeric.add_row(vec![
                    name.clone(),
                    stats.count.to_string(),
                    format_numeric(stats.mean),
                    format_numeric(stats.std),
                    format_numeric(stats.min),
                    format_numeric(stats.q1),
                    format_numeric(stats.median),
                    format_numeric(stats.q3),
                    format_numeric(stats.max),
                ]);
            }
            ColumnSummary::Categorical(stats) => {
                let top: Vec<String> = stats
                    .value_counts
                    .iter()
                    .take(3)
                    .map(|(value, count)| {
                        format!(
                            "{}={count}",
                            value.as_deref().unwrap_or("(missing)")
                        )
                    })
                    .collect();
                categorical.add_row(vec![
                    name.clone(),
                    stats.count.to_string(),
                    stats.unique.to_string(),
                    stats.mode.clone().unwrap_or_else(|| "-".to_string()),
                    top.join(", "),
                ]);
            }
        }
    }
    println!("{numeric}");
    println!("{categorical}");

    let mut missing = base_table(vec!["Column", "Missing", "Missing %"]);
    align_right(&mut missing, 1..3);
    for entry in &report.missing {
        missing.add_row(vec![
            entry.column.clone(),
            entry.missing.to_string(),
            format!("{:.1}", entry.percent),
        ]);
    }
    println!("{missing}");
}
