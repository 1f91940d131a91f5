//! View state update functions
//!
//! Sorting, filtering, pagination, selection and column visibility. These
//! never touch the row store.

use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::GridModel;

/// Handle view state messages
pub fn update_view(model: &mut GridModel, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::ToggleSort(column) => {
            model.toggle_sort(&column);
            None
        }
        ViewMsg::SetGlobalFilter(text) => {
            model.view.set_global_filter(&text);
            None
        }
        ViewMsg::SetColumnFilter { column, value } => {
            if model.schema.contains(column.as_str()) {
                model.view.set_column_filter(&column, &value);
            } else {
                tracing::warn!("Ignoring filter on unknown column '{}'", column);
            }
            None
        }
        ViewMsg::SetPage(index) => {
            model.set_page(index);
            None
        }
        ViewMsg::NextPage => {
            model.next_page();
            None
        }
        ViewMsg::PreviousPage => {
            model.previous_page();
            None
        }
        ViewMsg::SetPageSize(size) => {
            model.view.set_page_size(size);
            None
        }
        ViewMsg::ToggleRowSelected(row) => {
            model.toggle_row_selected(&row);
            None
        }
        ViewMsg::ToggleAllPageRowsSelected => {
            model.toggle_all_page_rows_selected();
            None
        }
        ViewMsg::ToggleColumnVisible(column) => {
            model.toggle_column_visible(&column)?;
            Some(Cmd::PersistColumnVisibility(
                model.view.column_visibility.clone(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::model::row::Row;
    use crate::model::schema::ColumnId;
    use crate::model::value::CellValue;
    use crate::model::view_state::SortDirection;

    fn model() -> GridModel {
        GridModel::with_rows(
            GridConfig::default(),
            (0..25)
                .map(|i| Row::new(i.to_string()).with("age", CellValue::Number(i as f64)))
                .collect(),
        )
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut model = model();
        let age = ColumnId::new("age");

        update_view(&mut model, ViewMsg::ToggleSort(age.clone()));
        assert_eq!(
            model.view.sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Ascending)
        );
        update_view(&mut model, ViewMsg::ToggleSort(age.clone()));
        assert_eq!(
            model.view.sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Descending)
        );
        update_view(&mut model, ViewMsg::ToggleSort(age));
        assert_eq!(
            model.view.sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Ascending)
        );
    }

    #[test]
    fn test_page_navigation() {
        let mut model = model();
        update_view(&mut model, ViewMsg::NextPage);
        update_view(&mut model, ViewMsg::NextPage);
        update_view(&mut model, ViewMsg::NextPage);
        assert_eq!(model.view.page_index, 2);

        update_view(&mut model, ViewMsg::SetPageSize(5));
        assert_eq!(model.view.page_index, 0);
        assert_eq!(model.slice().page_count, 5);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut model = model();
        update_view(&mut model, ViewMsg::SetPage(2));
        update_view(&mut model, ViewMsg::SetGlobalFilter("1".to_string()));
        assert_eq!(model.view.page_index, 0);
    }

    #[test]
    fn test_toggle_column_visible_persists() {
        let mut model = model();
        let cmd = update_view(&mut model, ViewMsg::ToggleColumnVisible(ColumnId::new("city")));
        match cmd {
            Some(Cmd::PersistColumnVisibility(map)) => {
                assert_eq!(map.get(&ColumnId::new("city")), Some(&false));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cmd = update_view(&mut model, ViewMsg::ToggleColumnVisible(ColumnId::new("actions")));
        assert!(cmd.is_none());
    }
}
