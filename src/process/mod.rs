// src/process/mod.rs

pub mod date_parser;
pub mod extract;
pub mod transform;
pub mod types;
pub mod utils;
pub mod validate;

use tracing::{info, instrument};

use crate::error::IngestError;
pub use date_parser::DateParser;
pub use extract::extract_rows;
pub use transform::transform_rows;
pub use types::{Dataset, RawRow, Record, ValidatedRow};
pub use validate::validate_rows;

/// Run one page of text through extract → validate → transform.
///
/// The first failing stage aborts the whole call; callers get either the
/// complete sorted dataset or an error, never a partial result.
#[instrument(level = "info", skip(page, dates), fields(page_len = page.len()))]
pub fn extract_transform_data(page: &str, dates: &DateParser) -> Result<Dataset, IngestError> {
    let rows = extract_rows(page)?;
    let validated = validate_rows(rows)?;
    let data = transform_rows(&validated, dates)?;
    info!(records = data.len(), "pipeline complete");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    const SNAPSHOT_PAGE: &str = include_str!("../../fixtures/website_snapshot_20201026.html");
    const SNAPSHOT_DATA: &str = include_str!("../../fixtures/data_snapshot_20201026.json");

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,covidscraper::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn test_snapshot_round_trip() -> anyhow::Result<()> {
        init_test_logging();
        let data = extract_transform_data(SNAPSHOT_PAGE, &DateParser::new(2020))?;

        let expected: Dataset = serde_json::from_str(SNAPSHOT_DATA)?;
        assert_eq!(data, expected);
        assert_eq!(serde_json::to_string(&data)?, SNAPSHOT_DATA.trim());
        Ok(())
    }

    #[test]
    fn test_minimal_page() -> anyhow::Result<()> {
        init_test_logging();
        let page = r#"<table>
            <tr><td>Day</td><td>New staff cases</td><td>New student cases</td></tr>
            <tr><td>Tuesday 27 October</td><td>1</td><td>17*</td></tr>
            <tr><td>Monday 19 October</td><td>5</td><td>23</td></tr>
        </table>"#;
        let data = extract_transform_data(page, &DateParser::new(2020))?;
        assert_eq!(
            serde_json::to_string(&data)?,
            r#"[["2020-10-19",5,23],["2020-10-27",1,17]]"#
        );
        Ok(())
    }

    #[test]
    fn test_unparseable_date_passes_validation_but_fails_transform() {
        let page = "<table><tr><td>Half term</td><td>1</td><td>2</td></tr></table>";
        let rows = extract_rows(page).unwrap();
        let validated = validate_rows(rows).unwrap();
        assert_eq!(validated.len(), 1);
        assert!(matches!(
            transform_rows(&validated, &DateParser::new(2020)),
            Err(IngestError::Value { .. })
        ));
        assert!(extract_transform_data(page, &DateParser::new(2020)).is_err());
    }

    #[test]
    fn test_stage_errors_propagate() {
        let dates = DateParser::new(2020);
        assert!(matches!(
            extract_transform_data("", &dates),
            Err(IngestError::Parse(_))
        ));
        let moved = "<table><tr><th>Day</th><th>Staff</th><th>Students</th></tr></table>";
        assert!(matches!(
            extract_transform_data(moved, &dates),
            Err(IngestError::StructuralValidation { .. })
        ));
    }

    #[test]
    fn test_no_rows_is_empty_dataset() {
        let data =
            extract_transform_data("<p>Figures will be published soon</p>", &DateParser::new(2020))
                .unwrap();
        assert!(data.is_empty());
    }
}
