//! Job collectors for Powered By MRP.
//!
//! Four independent pipelines live here and share only the data model from
//! `common`:
//!
//! - [`listings`]: a fixed set of hand-authored records (no network),
//! - [`browser`]: a headless-browser crawl of the LinkedIn listings and detail pages,
//! - [`simple`]: a single HTTP GET with selector chains and a keyword fallback,
//! - [`adp`]: a headless-browser crawl of the ADP recruitment portal that
//!   emits careers-site postings.

pub mod adp;
pub mod browser;
pub mod config;
pub mod error;
pub mod listings;
pub mod salary;
pub mod simple;
pub mod strategy;
pub mod summary;
pub mod wait;

pub use config::CollectorConfig;
pub use error::CollectError;

/// Company name stamped on records that the page itself did not attribute.
pub const COMPANY_NAME: &str = "Powered By MRP";
/// Headquarters used for the same purpose.
pub const COMPANY_LOCATION: &str = "Park City, Utah";
