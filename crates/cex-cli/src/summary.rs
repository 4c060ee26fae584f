use std::path::PathBuf;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cex_model::Language;

/// Post-run counters shown after an export or search.
#[derive(Debug)]
pub struct RunSummary {
    pub items_scanned: usize,
    pub rows: usize,
    pub columns: usize,
    pub artifact_path: PathBuf,
}

pub fn print_summary(summary: &RunSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Items scanned"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Artifact"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(summary.items_scanned),
        Cell::new(summary.rows),
        Cell::new(summary.columns),
        Cell::new(summary.artifact_path.display()),
    ]);
    println!("{table}");
}

pub fn print_languages(languages: &[Language]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Language")]);
    apply_table_style(&mut table);
    for language in languages {
        table.add_row(vec![Cell::new(language.as_str())]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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
