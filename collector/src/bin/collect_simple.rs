//! Simple LinkedIn job scraper for Powered By MRP
//!
//! One HTTP request, selector chains over the returned HTML, and a keyword
//! search when the page structure is not recognized. Saves to
//! mrp_jobs_simple.json and mrp_jobs_simple.csv.

use std::fs;

use anyhow::Context;
use collector::simple::SimpleCollector;
use collector::{summary, CollectorConfig};
use common::output::{write_csv, write_json};
use common::ExtractionReport;

const JOBS_JSON: &str = "mrp_jobs_simple.json";
const JOBS_CSV: &str = "mrp_jobs_simple.csv";

fn main() -> anyhow::Result<()> {
    common::logging::init();
    let config = CollectorConfig::from_env().context("Failed to load configuration")?;

    let report = SimpleCollector::new(&config)
        .and_then(|collector| collector.collect())
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "error during scraping");
            ExtractionReport::default()
        });

    print!("{}", summary::scraping_summary(&report)?);

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;
    write_json(&config.output_path(JOBS_JSON), &report.records)?;
    if report.records.is_empty() {
        println!("No data to save to CSV");
    } else {
        write_csv(&config.output_path(JOBS_CSV), &report.records)?;
    }
    Ok(())
}
