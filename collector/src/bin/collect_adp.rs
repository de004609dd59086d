//! ADP job collector for Powered By MRP
//!
//! Opens the ADP recruitment portal in headless Chrome, visits every posting's
//! CareerCenter page and saves the careers-site job list to jobs-from-adp.json.

use std::fs;

use anyhow::Context;
use collector::adp::{AdpCollector, POSTINGS_JSON};
use collector::browser::ChromePage;
use collector::{summary, CollectError, CollectorConfig};
use common::output::write_json;
use common::{ExtractionReport, Posting};

fn crawl(config: &CollectorConfig) -> Result<ExtractionReport<Posting>, CollectError> {
    let collector = AdpCollector::new(config, chrono::Local::now().date_naive())?;
    let page = ChromePage::launch(config).map_err(CollectError::browser)?;
    collector.collect(&page)
}

fn main() -> anyhow::Result<()> {
    common::logging::init();
    let config = CollectorConfig::from_env().context("Failed to load configuration")?;

    println!("🚀 Extracting job postings from the ADP portal...");
    let report = crawl(&config).unwrap_or_else(|err| {
        tracing::error!(error = %err, "ADP job scraping failed");
        ExtractionReport::default()
    });

    print!("{}", summary::adp_summary(&report)?);

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;
    let path = config.output_path(POSTINGS_JSON);
    write_json(&path, &report.records)?;
    println!("\n✅ Saved {} postings to {}", report.records.len(), path.display());
    Ok(())
}
