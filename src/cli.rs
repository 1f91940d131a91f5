//! Command-line argument parsing for the grid viewer
//!
//! Supports:
//! - Importing a CSV/TSV/PSV file
//! - Global filter, single-column sort and pagination
//! - Hiding columns for the session
//! - Exporting the filtered/sorted rows

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::csv::{detect_delimiter, Delimiter};
use crate::messages::{GridMsg, ViewMsg};
use crate::model::schema::ColumnId;

/// View, filter, sort and export tabular data
#[derive(Parser, Debug)]
#[command(name = "datagrid", version, about = "View, filter, sort and export tabular data")]
pub struct CliArgs {
    /// Delimited file to import (header row required)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Case-insensitive text matched against every visible column
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Sort by column id
    #[arg(short, long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending (used with --sort)
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, value_name = "N")]
    pub page: Option<usize>,

    /// Rows per page (defaults to the configured page size)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Hide a column for this run (repeatable)
    #[arg(long = "hide-column", value_name = "ID")]
    pub hide_columns: Vec<String>,

    /// Write the filtered/sorted rows to this file
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Use this config file instead of the default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// View messages implied by the flags, in application order
    pub fn view_messages(&self) -> Vec<GridMsg> {
        let mut msgs = Vec::new();

        for column in &self.hide_columns {
            msgs.push(GridMsg::View(ViewMsg::ToggleColumnVisible(ColumnId::new(
                column.as_str(),
            ))));
        }
        if let Some(filter) = &self.filter {
            msgs.push(GridMsg::set_global_filter(filter));
        }
        if let Some(column) = &self.sort {
            msgs.push(GridMsg::toggle_sort(column));
            if self.desc {
                msgs.push(GridMsg::toggle_sort(column));
            }
        }
        if let Some(size) = self.page_size {
            msgs.push(GridMsg::View(ViewMsg::SetPageSize(size)));
        }
        // Convert from 1-indexed (user input) to 0-indexed (internal)
        if let Some(page) = self.page {
            msgs.push(GridMsg::View(ViewMsg::SetPage(page.saturating_sub(1))));
        }

        msgs
    }

    /// Delimiter for the input: extension first, then content sniffing
    pub fn input_delimiter(&self, content: &str) -> Delimiter {
        delimiter_for(&self.input, content)
    }
}

fn delimiter_for(path: &Path, content: &str) -> Delimiter {
    match Delimiter::from_path(path) {
        Some(Delimiter::Comma) | None => detect_delimiter(content),
        Some(other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("datagrid").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_input_only() {
        let args = args(&["people.csv"]);
        assert_eq!(args.input, PathBuf::from("people.csv"));
        assert!(args.view_messages().is_empty());
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(CliArgs::try_parse_from(["datagrid", "a.csv", "--desc"]).is_err());
    }

    #[test]
    fn test_view_messages_order() {
        let args = args(&[
            "a.csv",
            "--hide-column",
            "city",
            "--filter",
            "bob",
            "--sort",
            "age",
            "--desc",
            "--page-size",
            "5",
            "--page",
            "2",
        ]);

        let msgs = args.view_messages();
        assert_eq!(
            msgs,
            vec![
                GridMsg::toggle_column_visible("city"),
                GridMsg::set_global_filter("bob"),
                GridMsg::toggle_sort("age"),
                GridMsg::toggle_sort("age"),
                GridMsg::View(ViewMsg::SetPageSize(5)),
                GridMsg::View(ViewMsg::SetPage(1)),
            ]
        );
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let msgs = args(&["a.csv", "--page", "0"]).view_messages();
        assert_eq!(msgs, vec![GridMsg::View(ViewMsg::SetPage(0))]);
    }

    #[test]
    fn test_input_delimiter() {
        assert_eq!(args(&["a.tsv"]).input_delimiter("a,b\n"), Delimiter::Tab);
        assert_eq!(args(&["a.csv"]).input_delimiter("a;b;c\n"), Delimiter::Semicolon);
        assert_eq!(args(&["a.txt"]).input_delimiter("a,b\n"), Delimiter::Comma);
    }
}
