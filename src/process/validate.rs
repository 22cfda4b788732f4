// src/process/validate.rs

use tracing::{debug, instrument, trace};

use super::types::{RawRow, ValidatedRow};
use super::utils::strip_marker;
use crate::error::IngestError;

/// First-cell text that marks a header row.
pub const HEADER_MARKER: &str = "Day";

/// Labels a header row must carry in cells 1 and 2.
pub const EXPECTED_HEADER_LABELS: [(usize, &str); 2] = [(1, "New staff"), (2, "New student")];

/// Structural pass over extracted rows.
///
/// Header rows are dropped after checking their labels, and a single
/// trailing `*` is removed from each cell. Anything else passes through
/// untouched, malformed or not: value checks belong to `transform_rows`.
#[instrument(level = "debug", skip(rows), fields(input_rows = rows.len()))]
pub fn validate_rows(rows: Vec<RawRow>) -> Result<Vec<ValidatedRow>, IngestError> {
    let mut validated = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        if is_header(&row) {
            check_header_labels(idx, &row)?;
            trace!(row = idx, "dropped header row");
            continue;
        }

        let cells = row
            .iter()
            .map(|cell| {
                let stripped = strip_marker(cell);
                if stripped.len() != cell.len() {
                    trace!(row = idx, cell = %cell, "stripped marker");
                }
                stripped.to_string()
            })
            .collect();
        validated.push(ValidatedRow::from_cells(cells));
    }

    debug!(kept = validated.len(), "validated rows");
    Ok(validated)
}

fn is_header(row: &[String]) -> bool {
    row.first().is_some_and(|c| c.contains(HEADER_MARKER))
}

fn check_header_labels(idx: usize, row: &[String]) -> Result<(), IngestError> {
    for (cell, expected) in EXPECTED_HEADER_LABELS {
        match row.get(cell) {
            Some(text) if text.contains(expected) => {}
            found => {
                return Err(IngestError::StructuralValidation {
                    row: idx,
                    cell,
                    expected,
                    found: found.cloned(),
                })
            }
        }
    }
    Ok(())
}
