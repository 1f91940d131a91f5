//! Schema registry
//!
//! Ordered column definitions. The registry only grows: columns are never
//! removed or renamed once created.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::ValueKind;
use crate::error::{GridError, Result};

/// Id of the row-selection column
pub const SELECT_COLUMN: &str = "select";
/// Id of the per-row actions column
pub const ACTIONS_COLUMN: &str = "actions";

/// Fields every imported row must carry
pub const REQUIRED_FIELDS: &[&str] = &["id", "name", "email", "age", "role"];

/// Optional record fields that are known to the engine but not displayed by
/// default. Used to coerce imported cells to the right kind.
pub const KNOWN_FIELDS: &[(&str, ValueKind)] = &[
    ("department", ValueKind::Text),
    ("location", ValueKind::Text),
    ("occupation", ValueKind::Text),
    ("income", ValueKind::Number),
    ("yearsOfExperience", ValueKind::Number),
];

/// Stable column identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a user supplied label: lower-cased, all whitespace removed
    pub fn from_label(label: &str) -> Self {
        Self(
            label
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Definition of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub id: ColumnId,
    pub label: String,
    pub value_kind: ValueKind,
    pub hideable: bool,
    pub sortable: bool,
    /// Selection and action columns: rendered, but never hold values
    pub structural: bool,
}

impl ColumnDefinition {
    /// A baseline data column: sortable and hideable
    pub fn data(id: &str, label: &str, value_kind: ValueKind) -> Self {
        Self {
            id: ColumnId::new(id),
            label: label.to_string(),
            value_kind,
            hideable: true,
            sortable: true,
            structural: false,
        }
    }

    fn structural(id: &str, label: &str) -> Self {
        Self {
            id: ColumnId::new(id),
            label: label.to_string(),
            value_kind: ValueKind::Text,
            hideable: false,
            sortable: false,
            structural: true,
        }
    }
}

/// Ordered list of column definitions
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    columns: Vec<ColumnDefinition>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::baseline()
    }
}

impl SchemaRegistry {
    /// The fixed baseline schema
    pub fn baseline() -> Self {
        Self {
            columns: vec![
                ColumnDefinition::structural(SELECT_COLUMN, ""),
                ColumnDefinition::data("name", "Name", ValueKind::Text),
                ColumnDefinition::data("email", "Email", ValueKind::Email),
                ColumnDefinition::data("age", "Age", ValueKind::Number),
                ColumnDefinition::data("role", "Role", ValueKind::Text),
                ColumnDefinition::data("gender", "Gender", ValueKind::Text),
                ColumnDefinition::data("city", "City", ValueKind::Text),
                ColumnDefinition::structural(ACTIONS_COLUMN, "Actions"),
            ],
        }
    }

    /// Build a registry from explicit definitions
    pub fn from_columns(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Columns that hold values, in definition order
    pub fn data_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| !c.structural)
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Kind used when coercing an imported field: schema first, then known
    /// optional fields, otherwise text.
    pub fn kind_for_field(&self, field: &str) -> ValueKind {
        if let Some(column) = self.get(field) {
            return column.value_kind;
        }
        KNOWN_FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
            .unwrap_or_default()
    }

    /// Append a new column derived from `label`.
    ///
    /// The column lands after the last data column, ahead of any trailing
    /// structural columns. New columns are hideable but not sortable.
    pub fn add_column(&mut self, label: &str, value_kind: ValueKind) -> Result<ColumnDefinition> {
        let id = ColumnId::from_label(label);
        if id.as_str().is_empty() {
            return Err(GridError::InvalidColumnLabel {
                label: label.to_string(),
            });
        }
        // Every row already carries an `id` field
        if self.contains(id.as_str()) || id.as_str() == "id" {
            return Err(GridError::DuplicateColumnId {
                id: id.to_string(),
            });
        }

        let column = ColumnDefinition {
            id,
            label: label.trim().to_string(),
            value_kind,
            hideable: true,
            sortable: false,
            structural: false,
        };

        let insert_at = self
            .columns
            .iter()
            .rposition(|c| !c.structural)
            .map(|idx| idx + 1)
            .unwrap_or(self.columns.len());
        self.columns.insert(insert_at, column.clone());

        tracing::debug!("Added column '{}' ({}) at {}", column.id, value_kind, insert_at);
        Ok(column)
    }
}
