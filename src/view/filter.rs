//! Row filtering for the view engine

use crate::model::edit_overlay::EditOverlay;
use crate::model::row::Row;
use crate::model::schema::ColumnDefinition;
use crate::model::view_state::ColumnFilter;

/// Case-insensitive substring match of `needle` against the string form of
/// each searched column. An empty needle matches every row.
pub fn matches_global(
    row: &Row,
    overlay: &EditOverlay,
    searched: &[&ColumnDefinition],
    needle: &str,
) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    searched.iter().any(|column| {
        overlay
            .effective(row, &column.id)
            .map(|value| value.to_string().to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

/// Every column filter must match (case-insensitive substring)
pub fn matches_column_filters(row: &Row, overlay: &EditOverlay, filters: &[ColumnFilter]) -> bool {
    filters.iter().all(|filter| {
        let needle = filter.value.to_lowercase();
        overlay
            .effective(row, &filter.column)
            .map(|value| value.to_string().to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}
