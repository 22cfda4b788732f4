// src/output/csv_file.rs

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::{io::Write, path::Path};
use tracing::info;

use crate::process::Record;

pub const CSV_HEADER: [&str; 3] = ["Date", "New staff cases", "New student cases"];

fn terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

/// Header row, then one row per record.
pub fn write_records<W: Write>(w: W, data: &[Record]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(terminator())
        .flexible(true)
        .from_writer(w);
    wtr.write_record(CSV_HEADER).context("writing CSV header")?;
    for record in data {
        wtr.write_record(record.to_fields())
            .with_context(|| format!("writing CSV row for {}", record.iso_date()))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}

pub fn write_csv(path: &Path, data: &[Record]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {:?}", path))?;
    write_records(file, data)?;
    info!(path = %path.display(), rows = data.len(), "wrote CSV");
    Ok(())
}
