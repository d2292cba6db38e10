//! Stage summary table printed after a cleaning run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use popclean_core::RunResult;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows before"),
        header_cell("Rows after"),
        header_cell("Affected"),
    ]);
    for idx in 1..4 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    for report in &result.reports {
        table.add_row(vec![
            Cell::new(report.stage.as_str()),
            Cell::new(report.rows_before),
            Cell::new(report.rows_after),
            Cell::new(report.affected()),
        ]);
    }
    println!("{table}");
    println!(
        "Rows: {} in, {} out ({} removed)",
        result.rows_in,
        result.rows_out,
        result.rows_in.saturating_sub(result.rows_out)
    );
    if let Some(bounds) = result.bounds {
        println!(
            "Population bounds: [{:.2}, {:.2}] (Q1 {:.2}, Q3 {:.2})",
            bounds.lower, bounds.upper, bounds.q1, bounds.q3
        );
    }
    if let Some(path) = &result.cleaned_path {
        println!("Checkpoint A (pre-impute):  {}", path.display());
    }
    if let Some(path) = &result.imputed_path {
        println!("Checkpoint B (post-impute): {}", path.display());
    }
}
