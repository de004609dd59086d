//! Per-item outcomes of a collection run.
//!
//! Collectors never abort on a single bad listing. Instead every problem is
//! recorded as an [`Issue`] next to the records that did make it through, so
//! callers can tell a missing optional field apart from a page whose structure
//! no longer matches the selectors.

use std::fmt;

use crate::job::JobRecord;

#[derive(Debug)]
pub struct ExtractionReport<T = JobRecord> {
    pub records: Vec<T>,
    pub issues: Vec<Issue>,
}

impl<T> Default for ExtractionReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            issues: Vec::new(),
        }
    }
}

/// Where in the pipeline an issue was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Listing,
    Detail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// The element was found but lacked this field; a default was used.
    MissingField(&'static str),
    /// The element could not be turned into a record at all.
    UnexpectedStructure(String),
    /// The browser or HTTP client failed to load the page.
    Navigation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Zero-based position of the listing element on the results page. Detail
    /// issues use the position of the listing they were reached from.
    pub item: usize,
    pub stage: Stage,
    /// Title of the affected job, when one was read.
    pub job: Option<String>,
    pub kind: IssueKind,
}

impl<T> ExtractionReport<T> {
    pub fn push_issue(&mut self, item: usize, stage: Stage, job: Option<&str>, kind: IssueKind) {
        let issue = Issue {
            item,
            stage,
            job: job.map(str::to_string),
            kind,
        };
        match issue.kind {
            IssueKind::MissingField(_) => tracing::debug!(%issue, "field missing"),
            _ => tracing::warn!(%issue, "extraction problem"),
        }
        self.issues.push(issue);
    }

    /// Issues that lost data, ignoring fields that simply were not published.
    pub fn failures(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| !matches!(issue.kind, IssueKind::MissingField(_)))
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            Stage::Listing => "listing",
            Stage::Detail => "detail",
        };
        write!(f, "{stage} #{}", self.item + 1)?;
        if let Some(job) = &self.job {
            write!(f, " ({job})")?;
        }
        match &self.kind {
            IssueKind::MissingField(field) => write!(f, ": missing {field}"),
            IssueKind::UnexpectedStructure(reason) => write!(f, ": unexpected structure: {reason}"),
            IssueKind::Navigation(reason) => write!(f, ": navigation failed: {reason}"),
        }
    }
}
