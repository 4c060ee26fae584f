//! Tab-delimited table rendering.
//!
//! Every cell is followed by exactly one tab, including the last cell of a
//! line, and lines end with CRLF. Quoted multi-value cells keep their
//! embedded newlines; stray tabs inside a cell are widened to three spaces
//! so they cannot shift columns.

use cex_engine::ExportTable;

/// Render the reconciled table to its on-disk byte form, header line first.
pub fn render_table(table: &ExportTable) -> Vec<u8> {
    let mut out = String::new();
    render_line(&mut out, &table.header);
    for row in &table.rows {
        render_line(&mut out, row);
    }
    out.into_bytes()
}

fn render_line(out: &mut String, cells: &[String]) {
    for cell in cells {
        out.push_str(&sanitize_cell(cell));
        out.push('\t');
    }
    out.push_str("\r\n");
}

fn sanitize_cell(cell: &str) -> String {
    cell.replace('\t', "   ")
}
