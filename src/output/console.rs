use std::io::{self, Write};

use crate::process::Record;

/// One record per line, in dataset order.
pub fn write_records<W: Write>(mut w: W, data: &[Record]) -> io::Result<()> {
    for record in data {
        writeln!(w, "{}", record)?;
    }
    w.flush()
}

/// Print the dataset to stdout.
pub fn print_dataset(data: &[Record]) -> io::Result<()> {
    let stdout = io::stdout();
    write_records(stdout.lock(), data)
}
