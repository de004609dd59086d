//! Powered By MRP job extractor
//!
//! Writes the hand-authored job records and company profile to
//! mrp_jobs_extracted.json, mrp_jobs_extracted.csv and mrp_company_info.json.

use std::fs;

use anyhow::Context;
use collector::{listings, summary, CollectorConfig};

fn main() -> anyhow::Result<()> {
    common::logging::init();
    let config = CollectorConfig::from_env().context("Failed to load configuration")?;

    println!("🔍 Extracting job information from LinkedIn content...");
    let jobs = listings::extracted_jobs();

    print!("{}", summary::extraction_summary(&jobs)?);

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;
    let written = listings::save(&config.output_dir, &jobs).context("Failed to save job data")?;

    println!("\n✅ Job extraction completed successfully!");
    println!("📁 Files created:");
    for path in written {
        println!("   • {}", path.display());
    }
    Ok(())
}
