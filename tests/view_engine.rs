//! View engine tests
//!
//! Filter, sort, pagination and column visibility driven through `update`.

mod common;

use common::{page_ids, run, test_model};
use datagrid::messages::{GridMsg, ViewMsg};
use datagrid::model::{ColumnId, SortDirection, ValueKind};
use datagrid::transaction::EditMode;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ========================================================================
// Sorting
// ========================================================================

#[test]
fn test_sort_number_toggles_ascending_then_descending() {
    let mut model = test_model(EditMode::Immediate);

    run(&mut model, [GridMsg::toggle_sort("age")]);
    assert_eq!(page_ids(&model), ids(&["4", "2", "1", "3", "5"]));
    assert_eq!(
        model.slice().sort.map(|s| s.direction),
        Some(SortDirection::Ascending)
    );

    run(&mut model, [GridMsg::toggle_sort("age")]);
    assert_eq!(page_ids(&model), ids(&["5", "3", "1", "2", "4"]));
    assert_eq!(
        model.slice().sort.map(|s| s.direction),
        Some(SortDirection::Descending)
    );
}

#[test]
fn test_sort_switching_column_starts_ascending() {
    let mut model = test_model(EditMode::Immediate);
    run(
        &mut model,
        [
            GridMsg::toggle_sort("age"),
            GridMsg::toggle_sort("age"),
            GridMsg::toggle_sort("name"),
        ],
    );

    let sort = model.slice().sort.unwrap();
    assert_eq!(sort.column, ColumnId::new("name"));
    assert_eq!(sort.direction, SortDirection::Ascending);
    assert_eq!(page_ids(&model), ids(&["2", "1", "3", "4", "5"]));
}

#[test]
fn test_sort_blanks_last_in_both_directions() {
    let mut model = test_model(EditMode::Immediate);

    run(&mut model, [GridMsg::toggle_sort("city")]);
    assert_eq!(page_ids(&model), ids(&["2", "1", "4", "3", "5"]));

    run(&mut model, [GridMsg::toggle_sort("city")]);
    assert_eq!(page_ids(&model), ids(&["1", "4", "2", "3", "5"]));
}

#[test]
fn test_sort_on_structural_column_is_ignored() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::toggle_sort("select")]);

    assert!(model.slice().sort.is_none());
    assert_eq!(page_ids(&model), ids(&["1", "2", "3", "4", "5"]));
}

#[test]
fn test_added_column_is_not_sortable() {
    let mut model = test_model(EditMode::Immediate);
    model.add_column("Department", ValueKind::Text).unwrap();
    run(&mut model, [GridMsg::toggle_sort("department")]);

    assert!(model.slice().sort.is_none());
}

// ========================================================================
// Filtering
// ========================================================================

#[test]
fn test_global_filter_bob_is_case_insensitive() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::set_global_filter("bob")]);

    assert_eq!(page_ids(&model), ids(&["1"]));
    assert_eq!(model.slice().filtered_count, 1);
}

#[test]
fn test_global_filter_matches_numbers_by_display_text() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::set_global_filter("100")]);

    assert_eq!(page_ids(&model), ids(&["5"]));
}

#[test]
fn test_global_filter_skips_hidden_columns() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::set_global_filter("oslo")]);
    assert_eq!(page_ids(&model), ids(&["1", "4"]));

    run(&mut model, [GridMsg::toggle_column_visible("city")]);
    assert!(page_ids(&model).is_empty());
}

#[test]
fn test_column_filter_combines_with_global_filter() {
    let mut model = test_model(EditMode::Immediate);
    run(
        &mut model,
        [
            GridMsg::View(ViewMsg::SetColumnFilter {
                column: ColumnId::new("city"),
                value: "OSLO".to_string(),
            }),
            GridMsg::set_global_filter("dave"),
        ],
    );
    assert_eq!(page_ids(&model), ids(&["4"]));

    run(
        &mut model,
        [
            GridMsg::set_global_filter(""),
            GridMsg::View(ViewMsg::SetColumnFilter {
                column: ColumnId::new("city"),
                value: String::new(),
            }),
        ],
    );
    assert_eq!(page_ids(&model).len(), 5);
}

#[test]
fn test_empty_result_has_no_pages() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::set_global_filter("nobody")]);

    let slice = model.slice();
    assert!(slice.is_empty());
    assert_eq!(slice.page_count, 0);
    assert_eq!(slice.page_index, 0);
    assert!(!slice.can_next_page());
    assert!(!slice.can_previous_page());
}

// ========================================================================
// Pagination
// ========================================================================

#[test]
fn test_pagination_walks_pages_and_clamps() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::View(ViewMsg::SetPageSize(2))]);

    let slice = model.slice();
    assert_eq!(slice.page_count, 3);
    assert_eq!(page_ids(&model), ids(&["1", "2"]));
    assert!(slice.can_next_page());
    assert!(!slice.can_previous_page());

    run(&mut model, [GridMsg::View(ViewMsg::NextPage)]);
    assert_eq!(page_ids(&model), ids(&["3", "4"]));

    run(
        &mut model,
        [
            GridMsg::View(ViewMsg::NextPage),
            GridMsg::View(ViewMsg::NextPage),
        ],
    );
    assert_eq!(model.slice().page_index, 2);
    assert_eq!(page_ids(&model), ids(&["5"]));
    assert!(!model.slice().can_next_page());

    run(&mut model, [GridMsg::View(ViewMsg::PreviousPage)]);
    assert_eq!(model.slice().page_index, 1);
}

#[test]
fn test_set_page_past_end_lands_on_last_page() {
    let mut model = test_model(EditMode::Immediate);
    run(
        &mut model,
        [
            GridMsg::View(ViewMsg::SetPageSize(2)),
            GridMsg::View(ViewMsg::SetPage(99)),
        ],
    );
    assert_eq!(model.slice().page_index, 2);
}

#[test]
fn test_filter_change_resets_page() {
    let mut model = test_model(EditMode::Immediate);
    run(
        &mut model,
        [
            GridMsg::View(ViewMsg::SetPageSize(2)),
            GridMsg::View(ViewMsg::SetPage(1)),
            GridMsg::set_global_filter("e"),
        ],
    );
    assert_eq!(model.view.page_index, 0);
}

#[test]
fn test_page_size_zero_is_clamped() {
    let mut model = test_model(EditMode::Immediate);
    run(&mut model, [GridMsg::View(ViewMsg::SetPageSize(0))]);

    assert_eq!(model.slice().page_size, 1);
    assert_eq!(model.slice().page_count, 5);
}

// ========================================================================
// Columns and selection
// ========================================================================

#[test]
fn test_visible_columns_follow_definition_order() {
    let model = test_model(EditMode::Immediate);
    let columns: Vec<String> = model
        .slice()
        .columns
        .iter()
        .map(|c| c.id.as_str().to_string())
        .collect();
    assert_eq!(
        columns,
        ids(&["select", "name", "email", "age", "role", "gender", "city", "actions"])
    );
}

#[test]
fn test_structural_columns_cannot_be_hidden() {
    let mut model = test_model(EditMode::Immediate);
    let cmds = run(
        &mut model,
        [
            GridMsg::toggle_column_visible("select"),
            GridMsg::toggle_column_visible("actions"),
        ],
    );

    assert!(cmds.is_empty());
    assert!(model.slice().column_index("select").is_some());
    assert!(model.slice().column_index("actions").is_some());
}

#[test]
fn test_structural_cells_are_blank() {
    let model = test_model(EditMode::Immediate);
    let slice = model.slice();
    assert_eq!(slice.cell(0, "select"), None);
    assert_eq!(slice.cell(0, "actions"), None);
    assert!(slice.cell(0, "name").is_some());
}

#[test]
fn test_toggle_all_page_rows_selected() {
    let mut model = test_model(EditMode::Immediate);
    run(
        &mut model,
        [
            GridMsg::View(ViewMsg::SetPageSize(2)),
            GridMsg::View(ViewMsg::ToggleAllPageRowsSelected),
        ],
    );
    assert_eq!(model.slice().selected_count, 2);
    assert!(model.slice().rows.iter().all(|r| r.selected));

    run(&mut model, [GridMsg::View(ViewMsg::ToggleAllPageRowsSelected)]);
    assert_eq!(model.slice().selected_count, 0);
}
