//! Typed cell values
//!
//! Cells are a tagged union dispatched on the column's `ValueKind`; comparators
//! and validators match on the tag instead of inspecting runtime types.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// The kind of value a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueKind {
    #[default]
    Text,
    Number,
    Email,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Email(String),
}

impl CellValue {
    /// Validate user input for a column of the given kind.
    ///
    /// Only `Number` columns can reject input: the trimmed text must parse as a
    /// finite number.
    pub fn parse(kind: ValueKind, column: &str, input: &str) -> Result<Self> {
        match kind {
            ValueKind::Text => Ok(CellValue::Text(input.to_string())),
            ValueKind::Email => Ok(CellValue::Email(input.to_string())),
            ValueKind::Number => parse_number(input)
                .map(CellValue::Number)
                .ok_or_else(|| GridError::validation(column, format!("'{}' is not a number", input))),
        }
    }

    /// Lenient conversion used by import: numbers that fail to parse stay text.
    pub fn coerce(kind: ValueKind, raw: &str) -> Self {
        match kind {
            ValueKind::Text => CellValue::Text(raw.to_string()),
            ValueKind::Email => CellValue::Email(raw.to_string()),
            ValueKind::Number => match parse_number(raw) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(raw.to_string()),
            },
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Text(_) => ValueKind::Text,
            CellValue::Number(_) => ValueKind::Number,
            CellValue::Email(_) => ValueKind::Email,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Compare two cells for sorting.
    ///
    /// Numbers compare numerically and order before every non-number; the
    /// rest compare by their string form. This is a total order.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Number(_), _) => Ordering::Less,
            (_, CellValue::Number(_)) => Ordering::Greater,
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::Email(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
