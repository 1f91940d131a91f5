//! Plain-text grid rendering
//!
//! Renders a view slice as an aligned table:
//! - Header row of column labels
//! - One line per displayed row, numbers right-aligned
//! - Footer with the page position and filtered row count

use crate::view::ViewSlice;

const MIN_WIDTH: usize = 4;
const MAX_WIDTH: usize = 40;
const SEPARATOR: &str = "  ";

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let text = truncate_text(text, width);
    if right_align {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

/// Column widths from header and cell contents, clamped to 4..=40 chars
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|h| h.chars().count().clamp(MIN_WIDTH, MAX_WIDTH))
        .collect();

    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if col < widths.len() {
                widths[col] = widths[col].max(cell.chars().count()).min(MAX_WIDTH);
            }
        }
    }

    widths
}

/// Footer line: `page X of Y (N rows)`
pub fn footer(slice: &ViewSlice) -> String {
    let page = if slice.page_count == 0 { 0 } else { slice.page_index + 1 };
    let mut line = format!(
        "page {} of {} ({} rows)",
        page, slice.page_count, slice.filtered_count
    );
    if slice.hidden_count > 0 {
        line.push_str(&format!(", {} hidden", slice.hidden_count));
    }
    line
}

/// Render the data columns of a slice. Rows with pending batch edits are
/// marked with `*`.
pub fn render_table(slice: &ViewSlice) -> String {
    let data_columns: Vec<usize> = slice
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.structural)
        .map(|(i, _)| i)
        .collect();

    let headers: Vec<String> = data_columns
        .iter()
        .map(|&i| slice.columns[i].label.clone())
        .collect();

    let cells: Vec<Vec<String>> = slice
        .rows
        .iter()
        .map(|row| {
            data_columns
                .iter()
                .map(|&i| {
                    row.cells
                        .get(i)
                        .and_then(|c| c.as_ref())
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let widths = column_widths(&headers, &cells);
    let mut out = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| pad(h, w, false))
        .collect();
    out.push_str("  ");
    out.push_str(header_line.join(SEPARATOR).trim_end());
    out.push('\n');

    for (row, values) in slice.rows.iter().zip(&cells) {
        let line: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, &w)| pad(v, w, is_number(v)))
            .collect();
        out.push_str(if row.pending { "* " } else { "  " });
        out.push_str(line.join(SEPARATOR).trim_end());
        out.push('\n');
    }

    out.push_str(&footer(slice));
    out.push('\n');
    out
}
