// src/output/json_file.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::process::Record;

/// Serialize the whole dataset as `[[date, n, n], ...]` in one write.
pub fn write_json(path: &Path, data: &[Record]) -> Result<()> {
    let json = serde_json::to_string(data).context("serializing dataset")?;
    fs::write(path, json).with_context(|| format!("writing {:?}", path))?;
    info!(path = %path.display(), records = data.len(), "wrote JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_write_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("cases.json");
        let data = vec![
            Record::new(NaiveDate::from_ymd_opt(2020, 10, 19).unwrap(), vec![5, 23]),
            Record::new(NaiveDate::from_ymd_opt(2020, 10, 27).unwrap(), vec![1, 17]),
        ];
        write_json(&path, &data)?;

        assert_eq!(
            fs::read_to_string(&path)?,
            r#"[["2020-10-19",5,23],["2020-10-27",1,17]]"#
        );
        let back: Vec<Record> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(back, data);
        Ok(())
    }

    #[test]
    fn test_empty_dataset() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.json");
        write_json(&path, &[])?;
        assert_eq!(fs::read_to_string(&path)?, "[]");
        Ok(())
    }
}
