//! Row sorting for the view engine

use std::cmp::Ordering;

use crate::model::edit_overlay::EditOverlay;
use crate::model::row::Row;
use crate::model::schema::ColumnDefinition;
use crate::model::value::{CellValue, ValueKind};
use crate::model::view_state::SortDirection;

/// Compare two present values according to the column's kind
fn compare_values(kind: ValueKind, a: &CellValue, b: &CellValue) -> Ordering {
    match kind {
        ValueKind::Number => a.compare(b),
        ValueKind::Text | ValueKind::Email => a.to_string().cmp(&b.to_string()),
    }
}

/// Stable sort by a single column. Blank cells go last in both directions.
pub fn sort_rows(
    rows: &mut [&Row],
    overlay: &EditOverlay,
    column: &ColumnDefinition,
    direction: SortDirection,
) {
    rows.sort_by(|a, b| {
        let left = overlay.effective(a, &column.id);
        let right = overlay.effective(b, &column.id);
        match (left, right) {
            (Some(x), Some(y)) => {
                let ord = compare_values(column.value_kind, x, y);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
