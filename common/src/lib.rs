//! Shared data model and output plumbing for the MRP job collectors.
//!
//! The LinkedIn collectors produce an ordered `Vec<JobRecord>`; the writers in
//! [`output`] turn that into the JSON and CSV files the rest of the toolkit
//! (and the jobs server) consume. The ADP collector emits [`Posting`]s, the
//! shape the careers site reads.

pub mod company;
pub mod error;
pub mod job;
pub mod logging;
pub mod output;
pub mod posting;
pub mod report;

pub use company::{CompanyInfo, Funding};
pub use error::OutputError;
pub use job::{Benefits, ContactInfo, JobRecord, NOT_SPECIFIED};
pub use posting::Posting;
pub use report::{ExtractionReport, Issue, IssueKind, Stage};
