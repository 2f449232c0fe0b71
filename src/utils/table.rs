use std::fmt::Write;

use crate::data::summary::{ColumnSummary, STATISTICS};

/// Lays out an index column plus `headers`, each column right-aligned to
/// its widest cell.
pub fn render_table(index: &[String], headers: &[String], rows: &[Vec<String>]) -> String {
    let index_width = index.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (header, &width) in headers.iter().zip(&widths) {
        let _ = write!(out, "  {header:>width$}");
    }
    out.push('\n');

    for (label, row) in index.iter().zip(rows) {
        let _ = write!(out, "{label:<index_width$}");
        for (col, &width) in widths.iter().enumerate() {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            let _ = write!(out, "  {cell:>width$}");
        }
        out.push('\n');
    }
    out
}

pub fn render_head(headers: &[String], rows: &[Vec<String>]) -> String {
    let index: Vec<String> = (0..rows.len()).map(|i| i.to_string()).collect();
    render_table(&index, headers, rows)
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

pub fn render_summary(summary: &[ColumnSummary]) -> String {
    let headers: Vec<String> = summary.iter().map(|s| s.name.clone()).collect();
    let columns: Vec<[f64; 8]> = summary.iter().map(ColumnSummary::values).collect();
    let rows: Vec<Vec<String>> = (0..STATISTICS.len())
        .map(|stat| columns.iter().map(|c| format_stat(c[stat])).collect())
        .collect();
    let index: Vec<String> = STATISTICS.iter().map(|s| s.to_string()).collect();
    render_table(&index, &headers, &rows)
}
