// src/process/extract.rs

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, trace, warn};

use super::types::RawRow;
use super::utils::clean_str;
use crate::error::IngestError;

/// Elements html5ever synthesizes around bare text.
const SCAFFOLD: &[&str] = &["html", "head", "body"];

/// Pull every `<tr>` out of `page`, one `RawRow` per row, in document order.
///
/// Each element child of the row becomes one cell holding its flattened
/// text. Nothing is filtered here; layout tables come through too.
#[instrument(level = "debug", skip(page), fields(page_len = page.len()))]
pub fn extract_rows(page: &str) -> Result<Vec<RawRow>, IngestError> {
    if page.trim().is_empty() {
        return Err(IngestError::Parse("page is empty".into()));
    }

    let document = Html::parse_document(page);
    if !document.errors.is_empty() {
        debug!(count = document.errors.len(), "html parser recovered from errors");
    }

    let has_markup = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|el| !SCAFFOLD.contains(&el.value().name()));
    if !has_markup {
        warn!("no elements found in page");
        return Err(IngestError::Parse("no markup elements found".into()));
    }

    let row_selector =
        Selector::parse("tr").expect("CSS selector for table rows should be valid");
    let rows: Vec<RawRow> = document
        .select(&row_selector)
        .map(|tr| {
            let cells: RawRow = tr
                .children()
                .filter_map(ElementRef::wrap)
                .map(|cell| clean_str(&cell.text().collect::<String>()))
                .collect();
            trace!(?cells, "row");
            cells
        })
        .collect();

    debug!(rows = rows.len(), "extracted rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_rows_in_document_order() {
        let page = r#"<html><body>
            <table>
              <tr><th>Day</th><th>New staff cases</th><th>New student cases</th></tr>
              <tr><td>Monday 26 October</td><td>3*</td><td>16</td></tr>
            </table>
            <table><tr><td>Tuesday 27 October</td><td>1</td><td>17</td></tr></table>
        </body></html>"#;

        let rows = extract_rows(page).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Day", "New staff cases", "New student cases"],
                vec!["Monday 26 October", "3*", "16"],
                vec!["Tuesday 27 October", "1", "17"],
            ]
        );
    }

    #[test]
    fn test_nested_markup_and_empty_cells() {
        let page = "<table><tr><td><p><strong>Monday</strong>\n 26&nbsp;October</p></td>\
                    <td></td><td> <br> </td></tr></table>";
        let rows = extract_rows(page).unwrap();
        assert_eq!(rows, vec![vec!["Monday 26 October", "", ""]]);
    }

    #[test]
    fn test_rows_without_tbody_and_layout_tables() {
        // Layout and data tables come out alike.
        let page = "<table><tr><td>Layout</td></tr></table>\
                    <table><tbody><tr><td>5</td></tr></tbody></table>";
        let rows = extract_rows(page).unwrap();
        assert_eq!(rows, vec![vec!["Layout"], vec!["5"]]);
    }

    #[test]
    fn test_markup_without_rows_is_empty() {
        let rows = extract_rows("<html><body><p>No table today</p></body></html>").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unparseable_input_fails() {
        assert!(matches!(extract_rows(""), Err(IngestError::Parse(_))));
        assert!(matches!(extract_rows("   \n"), Err(IngestError::Parse(_))));
        assert!(matches!(
            extract_rows("just some words, no tags"),
            Err(IngestError::Parse(_))
        ));
    }
}
