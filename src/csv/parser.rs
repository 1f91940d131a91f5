//! CSV import using the csv crate
//!
//! RFC 4180 parsing with a mandatory header row. Header cells become column
//! ids verbatim; cells are coerced by the kind the schema (or the known
//! optional fields) assigns to that id.

use std::collections::HashSet;
use std::io::Cursor;

use super::model::Delimiter;
use crate::error::{GridError, Result};
use crate::model::row::{Row, RowId};
use crate::model::schema::{SchemaRegistry, REQUIRED_FIELDS};
use crate::model::value::{CellValue, ValueKind};

const ID_FIELD: &str = "id";

/// Parse delimited text into rows ready for `RowStore::replace_all`.
///
/// Blank cells are left absent, except required text fields which keep an
/// empty value. Rows without an `id` column (or with a blank
/// id) get a fresh `row-N` id that never collides with a parsed one.
pub fn parse_import(content: &str, delimiter: Delimiter, schema: &SchemaRegistry) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Headers)
        .from_reader(Cursor::new(content.as_bytes()));

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(GridError::parse(None, "missing header row"));
    }

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(GridError::parse(
                Some(1),
                format!("duplicate header '{}'", header),
            ));
        }
    }

    let id_index = headers.iter().position(|h| h == ID_FIELD);

    let mut parsed: Vec<(Option<String>, Row)> = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Row::new("");
        let mut id = None;

        for (index, raw) in record.iter().enumerate() {
            if Some(index) == id_index {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    id = Some(trimmed.to_string());
                }
                continue;
            }
            let field = &headers[index];
            let kind = schema.kind_for_field(field);
            // Required text fields keep their blank so the row passes validation.
            let keep_blank =
                kind != ValueKind::Number && REQUIRED_FIELDS.contains(&field.as_str());
            if raw.is_empty() && !keep_blank {
                continue;
            }
            let value = CellValue::coerce(kind, raw);
            row = row.with(field, value);
        }
        parsed.push((id, row));
    }

    let mut taken: HashSet<String> = HashSet::new();
    for (position, (id, _)) in parsed.iter().enumerate() {
        if let Some(id) = id {
            if !taken.insert(id.clone()) {
                return Err(GridError::malformed(
                    position + 1,
                    format!("duplicate id '{}'", id),
                ));
            }
        }
    }

    let mut next_fresh = 1usize;
    let mut rows = Vec::with_capacity(parsed.len());
    for (id, mut row) in parsed {
        let id = match id {
            Some(id) => id,
            None => loop {
                let candidate = format!("row-{}", next_fresh);
                next_fresh += 1;
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            },
        };
        row.id = RowId::new(id);
        rows.push(row);
    }

    tracing::debug!(
        "Parsed {} rows with {} columns ({:?})",
        rows.len(),
        headers.len(),
        delimiter
    );
    Ok(rows)
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}
