// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::{fs, path::Path, time::Duration};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Source;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking client used for the single page download.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build().context("building HTTP client")
}

/// GET `url` once and return the body as text. Non-2xx is an error.
#[instrument(level = "info", skip(client, url), fields(url = %url))]
pub fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    let body = client
        .get(url.clone())
        .send()
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .with_context(|| format!("Reading text from {}", url))?;
    info!(bytes = body.len(), "fetched page");
    Ok(body)
}

/// Read a saved copy of the page instead of going to the network.
pub fn read_page(path: &Path) -> Result<String> {
    let body =
        fs::read_to_string(path).with_context(|| format!("reading page from {:?}", path))?;
    info!(path = %path.display(), bytes = body.len(), "read page");
    Ok(body)
}

/// Load page text from whichever source the run is configured with.
pub fn load_page(source: &Source, timeout: Option<Duration>) -> Result<String> {
    match source {
        Source::Url(url) => {
            let client = build_client(timeout)?;
            fetch_page(&client, url)
        }
        Source::File(path) => read_page(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_page_from_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "<table><tr><td>Monday 26 October</td></tr></table>")?;

        let page = load_page(&Source::File(tmp.path().to_path_buf()), None)?;
        assert!(page.contains("Monday 26 October"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_page(Path::new("does/not/exist.html")).unwrap_err();
        assert!(format!("{:#}", err).contains("reading page from"));
    }

    #[test]
    fn test_build_client_with_timeout() {
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
        assert!(build_client(None).is_ok());
    }
}
