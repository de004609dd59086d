use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_JOBS_FILE: &str = "mrp_jobs_extracted.json";
pub const COMPANY_FILE: &str = "mrp_company_info.json";
pub const DEFAULT_POSTINGS_FILE: &str = "jobs-from-adp.json";

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub jobs_file: String,
    pub postings_file: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Ok(Self {
            data_dir: env::var("MRP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            jobs_file: env::var("MRP_JOBS_FILE").unwrap_or_else(|_| DEFAULT_JOBS_FILE.to_string()),
            postings_file: env::var("MRP_POSTINGS_FILE").unwrap_or_else(|_| DEFAULT_POSTINGS_FILE.to_string()),
            bind_addr: env::var("MRP_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
                .parse()
                .context("MRP_BIND_ADDR must be a socket address like 127.0.0.1:3000")?,
        })
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.data_dir.join(&self.jobs_file)
    }

    pub fn postings_path(&self) -> PathBuf {
        self.data_dir.join(&self.postings_file)
    }

    pub fn company_path(&self) -> PathBuf {
        self.data_dir.join(COMPANY_FILE)
    }
}
