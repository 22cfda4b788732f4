// src/config.rs

use clap::Parser;
use std::{path::PathBuf, time::Duration};
use url::Url;

use crate::process::DateParser;

/// The dashboard this tool was written against.
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.sheffield.ac.uk/autumn-term-2020/covid-19-statistics/";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "covidscraper",
    version,
    about = "Scrape staff and student COVID-19 case counts into CSV, JSON and a bar chart"
)]
pub struct Cli {
    /// Also write the dataset as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Also write the dataset as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Page to scrape
    #[arg(long, default_value = DEFAULT_SOURCE_URL, conflicts_with = "input")]
    pub url: Url,

    /// Read the page from a saved file instead of fetching it
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Year for dates written without one (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Directory the chart image is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub chart_dir: PathBuf,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Where the page text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub year: i32,
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub chart_dir: PathBuf,
    pub timeout: Option<Duration>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let source = match cli.input {
            Some(path) => Source::File(path),
            None => Source::Url(cli.url),
        };
        Self {
            source,
            year: cli
                .year
                .unwrap_or_else(|| DateParser::current_year().default_year),
            csv: cli.csv,
            json: cli.json,
            chart_dir: cli.chart_dir,
            timeout: cli.timeout_secs.map(Duration::from_secs),
        }
    }
}
