use anyhow::{Context, Result};
use clap::Parser;
use covidscraper::{
    extract_transform_data, fetch,
    output::{self, print_dataset},
    Cli, Config, DateParser,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Cli::parse());
    info!(source = ?config.source, year = config.year, "startup");

    // ─── 2) fetch the page ───────────────────────────────────────────
    let page = fetch::load_page(&config.source, config.timeout)?;

    // ─── 3) extract → validate → transform ──────────────────────────
    let data = extract_transform_data(&page, &DateParser::new(config.year))
        .context("processing case table")?;

    // ─── 4) outputs, only once the whole dataset exists ─────────────
    print_dataset(&data).context("writing records to stdout")?;

    if let Some(path) = &config.csv {
        output::write_csv(path, &data)?;
    }
    if let Some(path) = &config.json {
        output::write_json(path, &data)?;
    }
    output::write_chart(&config.chart_dir, &data)?;

    info!(records = data.len(), "all done");
    Ok(())
}
