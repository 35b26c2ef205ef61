use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mrec_model::{MatchMode, Status};

use crate::types::MatchOutcome;

pub fn print_summary(outcome: &MatchOutcome) {
    println!("Base: {}", outcome.base.display());
    println!("Target: {} ({} rows)", outcome.target.display(), outcome.target_rows);
    println!(
        "Report: {} ({})",
        outcome.output.display(),
        outcome.format.extension()
    );
    println!(
        "Mode: {} (threshold {})",
        mode_label(outcome.mode),
        outcome.threshold
    );

    let summary = &outcome.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Base rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        status_cell(Status::Success),
        count_cell(summary.success, Color::Green),
    ]);
    table.add_row(vec![
        status_cell(Status::Warning),
        count_cell(summary.warning, Color::Yellow),
    ]);
    table.add_row(vec![
        status_cell(Status::Failed),
        count_cell(summary.failed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.base_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Matched {} of {} base rows ({:.1}%), {} report rows in {:.2?}",
        summary.matched(),
        summary.base_rows,
        summary.match_rate() * 100.0,
        summary.output_rows,
        outcome.elapsed
    );
}

pub fn print_columns(path: &Path, columns: &[String]) {
    println!("{}", path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, column) in columns.iter().enumerate() {
        table.add_row(vec![dim_cell(idx + 1), Cell::new(column)]);
    }
    println!("{table}");
}

fn mode_label(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::Fuzzy => "fuzzy",
        MatchMode::SetIntersection => "tokens",
    }
}

fn status_cell(status: Status) -> Cell {
    let color = match status {
        Status::Success => Color::Green,
        Status::Warning => Color::Yellow,
        Status::Failed => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
