// src/process/transform.rs

use tracing::{debug, instrument};

use super::date_parser::DateParser;
use super::types::{Dataset, Record, ValidatedRow};
use crate::error::{IngestError, ValueKind};

/// Type every validated row and return them sorted.
///
/// Cell 0 becomes the date, every other cell an integer. The first cell
/// that will not coerce fails the whole batch.
#[instrument(level = "debug", skip(rows, dates), fields(input_rows = rows.len()))]
pub fn transform_rows(rows: &[ValidatedRow], dates: &DateParser) -> Result<Dataset, IngestError> {
    let mut result = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| transform_row(idx, row, dates))
        .collect::<Result<Dataset, _>>()?;

    result.sort();
    debug!(records = result.len(), "transformed rows");
    Ok(result)
}

fn transform_row(idx: usize, row: &ValidatedRow, dates: &DateParser) -> Result<Record, IngestError> {
    let cells = row.cells();
    let raw_date = cells.first().ok_or(IngestError::Value {
        row: idx,
        cell: 0,
        value: None,
        kind: ValueKind::Date,
    })?;
    let date = dates.parse(raw_date).ok_or_else(|| IngestError::Value {
        row: idx,
        cell: 0,
        value: Some(raw_date.clone()),
        kind: ValueKind::Date,
    })?;

    let counts = cells
        .iter()
        .enumerate()
        .skip(1)
        .map(|(cell, text)| {
            parse_count(text).ok_or_else(|| IngestError::Value {
                row: idx,
                cell,
                value: Some(text.clone()),
                kind: ValueKind::Integer,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Record::new(date, counts))
}

/// Plain base-10 integer, optional sign, no separators.
fn parse_count(text: &str) -> Option<i64> {
    let t = text.trim();
    let digits = t.strip_prefix(['-', '+']).unwrap_or(t);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    t.parse().ok()
}
