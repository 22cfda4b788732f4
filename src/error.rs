// src/error.rs

use std::fmt;
use thiserror::Error;

/// What a cell was expected to hold when coercion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Date,
    Integer,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Date => f.write_str("date"),
            ValueKind::Integer => f.write_str("integer"),
        }
    }
}

/// Failures raised by the extract → validate → transform pipeline.
///
/// Every variant is fatal for the run: callers get the first failure and
/// no partial dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The page text could not be turned into a document with any markup.
    #[error("could not parse page markup: {0}")]
    Parse(String),

    /// A header row was found but its neighbouring labels changed.
    #[error(
        "header row {row} has unexpected label in cell {cell}: expected {expected:?}, found {}",
        .found.as_deref().map(|s| format!("{s:?}")).unwrap_or_else(|| "no cell".into())
    )]
    StructuralValidation {
        row: usize,
        cell: usize,
        expected: &'static str,
        found: Option<String>,
    },

    /// A cell failed date or integer coercion.
    #[error(
        "row {row}, cell {cell}: {} is not a valid {kind}",
        .value.as_deref().map(|s| format!("{s:?}")).unwrap_or_else(|| "missing value".into())
    )]
    Value {
        row: usize,
        cell: usize,
        value: Option<String>,
        kind: ValueKind,
    },
}
