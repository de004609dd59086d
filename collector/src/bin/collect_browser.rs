//! LinkedIn job scraper for Powered By MRP
//!
//! Drives headless Chrome through the company jobs page and every job detail
//! page, then saves to mrp_jobs.json and mrp_jobs.csv.

use std::fs;

use anyhow::Context;
use collector::browser::{BrowserCollector, ChromePage};
use collector::{summary, CollectError, CollectorConfig};
use common::output::{write_csv, write_json};
use common::ExtractionReport;

const JOBS_JSON: &str = "mrp_jobs.json";
const JOBS_CSV: &str = "mrp_jobs.csv";

/// Launches the browser, crawls, and drops the browser before returning.
fn crawl(config: &CollectorConfig) -> Result<ExtractionReport, CollectError> {
    let collector = BrowserCollector::new(config)?;
    let page = ChromePage::launch(config).map_err(CollectError::browser)?;
    collector.collect(&page)
}

fn main() -> anyhow::Result<()> {
    common::logging::init();
    let config = CollectorConfig::from_env().context("Failed to load configuration")?;

    let report = crawl(&config).unwrap_or_else(|err| {
        tracing::error!(error = %err, "error during scraping");
        ExtractionReport::default()
    });

    print!("{}", summary::scraping_summary(&report)?);

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;
    write_json(&config.output_path(JOBS_JSON), &report.records)?;
    write_csv(&config.output_path(JOBS_CSV), &report.records)?;
    Ok(())
}
