//! ADP Workforce Now collector.
//!
//! The recruitment portal renders one element per posting whose id is the
//! 13-digit requisition id plus a suffix (`9201410695317_1`). Every posting is
//! opened through its CareerCenter apply URL, and the result is converted into
//! the [`Posting`] shape the careers site reads.

use std::ops::Range;

use chrono::NaiveDate;
use common::{ExtractionReport, IssueKind, Posting, Stage};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::browser::Page;
use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::strategy::{selector, FieldChain, Read, Strategy};
use crate::wait::{Clock, SystemClock, Wait, WaitError};

pub const POSTINGS_JSON: &str = "jobs-from-adp.json";

const DEFAULT_LOCATION: &str = "Park City, UT";
const DEFAULT_TYPE: &str = "Full Time";
const DEFAULT_POSTED: &str = "Recently";
const CURRENCY: &str = "USD";
const SLUG_LEN: usize = 50;

/// Rendered once the job description of a posting is on screen.
const DETAIL_READY: &str = r#"[class*="description"]"#;

const NICE_TO_HAVES: &str = "- Medical device industry experience\n- Previous experience in similar role\n- Advanced certifications or training\n- Knowledge of medical aesthetics market";

/// One posting as listed on the portal's landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct AdpListing {
    /// Position among the posting elements of the landing page.
    pub position: usize,
    pub job_id: String,
    pub element_id: String,
    pub title: String,
    pub location: String,
    /// `Full Time` or `Part Time`.
    pub kind: String,
    pub posted: String,
}

/// Markdown read from a posting's own page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AdpDetails {
    pub description: Option<String>,
    pub requirements: Option<String>,
}

/// Apply link for a requisition id on the given portal.
pub fn apply_url(portal: &str, job_id: &str) -> String {
    format!("{portal}&selectedMenuKey=CareerCenter&jobId={job_id}")
}

/// URL-friendly id: lowercase ASCII letters and digits, words joined by `-`,
/// at most 50 characters.
pub fn slug(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(SLUG_LEN)
        .collect()
}

/// Department inferred from keywords in the title. First rule wins.
pub fn department(title: &str) -> &'static str {
    const RULES: [(&[&str], &str); 5] = [
        (&["Finance"], "Finance"),
        (&["Ecommerce"], "Marketing"),
        (&["Supply Chain", "Depot"], "Operations"),
        (&["Procurement"], "Procurement"),
        (&["Aesthetic", "Consultant"], "Sales"),
    ];
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map_or("Operations", |(_, department)| *department)
}

/// Advertised annual salary band (min, max) in USD by seniority keyword.
pub fn salary_band(title: &str) -> (i64, i64) {
    if title.contains("Manager") {
        (80_000, 120_000)
    } else if title.contains("Director") {
        (120_000, 180_000)
    } else if title.contains("Specialist") {
        (60_000, 90_000)
    } else if title.contains("Consultant") {
        (70_000, 100_000)
    } else {
        (50_000, 70_000)
    }
}

/// `Full Time` becomes `FULL_TIME`.
pub fn employment_type(kind: &str) -> String {
    kind.to_uppercase().replacen(' ', "_", 1)
}

impl AdpListing {
    pub fn to_posting(&self, portal: &str, details: AdpDetails, posted_at: NaiveDate) -> Posting {
        let (salary_min, salary_max) = salary_band(&self.title);
        let description_md = details.description.unwrap_or_else(|| {
            format!(
                "Join our team as a {} at MRP. We're looking for dedicated professionals to help us build the future of medical aesthetics. This role offers the opportunity to work with cutting-edge technology and make a real impact in the medical device industry.",
                self.title
            )
        });
        let requirements_md = details.requirements.unwrap_or_else(|| {
            format!(
                "- Relevant experience in {}\n- Strong communication and interpersonal skills\n- Team player with collaborative mindset\n- Commitment to excellence and continuous improvement\n- Bachelor's degree or equivalent experience preferred",
                self.title.to_lowercase()
            )
        });

        Posting {
            id: slug(&self.title),
            title: self.title.clone(),
            department: department(&self.title).to_string(),
            location: self.location.clone(),
            kind: self.kind.clone(),
            salary_min: Some(salary_min),
            salary_max: Some(salary_max),
            currency: Some(CURRENCY.to_string()),
            description_md,
            requirements_md,
            nice_to_haves_md: Some(NICE_TO_HAVES.to_string()),
            apply_url: apply_url(portal, &self.job_id),
            posted_at: posted_at.to_string(),
            remote: false,
            locations: vec![self.location.clone()],
            employment_type: employment_type(&self.kind),
        }
    }
}

/// A chain of text strategies that only accept values of the given length.
fn bounded(
    field: &'static str,
    selectors: &[&'static str],
    chars: Range<usize>,
) -> Result<FieldChain, CollectError> {
    let strategies = selectors
        .iter()
        .map(|css| Ok(Strategy::css(*css, Read::Text)?.within(chars.clone())))
        .collect::<Result<Vec<_>, CollectError>>()?;
    Ok(FieldChain::new(field, strategies))
}

#[derive(Debug, Clone)]
pub struct AdpSelectors {
    with_id: Selector,
    job_id: Regex,
    title: FieldChain,
    description: FieldChain,
    requirements: FieldChain,
}

impl AdpSelectors {
    pub fn workforce_now() -> Result<Self, CollectError> {
        Ok(Self {
            with_id: selector("[id]")?,
            job_id: Regex::new(r"^(\d{13})_\d+$").map_err(|e| CollectError::Selector {
                selector: "job id pattern".to_string(),
                reason: e.to_string(),
            })?,
            title: FieldChain::of(
                "title",
                Read::Text,
                &[r#"[id*="lblTitle"]"#, r#"[class*="title"]"#, "span"],
            )?,
            description: bounded(
                "description",
                &[
                    r#"[class*="description"]"#,
                    r#"[class*="job-desc"]"#,
                    r#"[id*="description"]"#,
                    "p",
                    "div",
                ],
                101..2000,
            )?,
            requirements: bounded(
                "requirements",
                &[
                    r#"[class*="requirement"]"#,
                    r#"[class*="qualification"]"#,
                    r#"[id*="requirement"]"#,
                ],
                51..1000,
            )?,
        })
    }

    /// Requisition id carried by an element id such as `9201410695317_1`.
    pub fn job_id<'a>(&self, element_id: &'a str) -> Option<&'a str> {
        self.job_id
            .captures(element_id)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str())
    }

    /// Reads the posting elements of a landing-page snapshot, first occurrence
    /// of each requisition id only.
    pub fn parse_listings(&self, html: &str) -> ExtractionReport<AdpListing> {
        let document = Html::parse_document(html);
        let mut report = ExtractionReport::default();

        let postings = document.select(&self.with_id).filter_map(|element| {
            let id = element.value().id()?;
            self.job_id(id).map(|job_id| (element, id, job_id))
        });

        for (position, (element, element_id, job_id)) in postings.enumerate() {
            if report.records.iter().any(|listing: &AdpListing| listing.job_id == job_id) {
                tracing::debug!(job_id, element_id, "duplicate posting element");
                continue;
            }
            match self.parse_posting(element) {
                Ok((title, location, kind, posted)) => report.records.push(AdpListing {
                    position,
                    job_id: job_id.to_string(),
                    element_id: element_id.to_string(),
                    title,
                    location,
                    kind,
                    posted,
                }),
                Err(reason) => report.push_issue(
                    position,
                    Stage::Listing,
                    None,
                    IssueKind::UnexpectedStructure(reason),
                ),
            }
        }
        report
    }

    fn parse_posting(&self, element: ElementRef<'_>) -> Result<(String, String, String, String), String> {
        let lines: Vec<&str> = element
            .text()
            .flat_map(str::lines)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let title = self
            .title
            .value(element)
            .or_else(|| lines.first().map(|line| line.to_string()))
            .ok_or_else(|| "no text".to_string())?;
        let length = title.chars().count();
        if !(6..200).contains(&length) {
            return Err(format!("title of {length} characters"));
        }

        let mut location: Option<String> = None;
        let mut kind: Option<&str> = None;
        let mut posted: Option<String> = None;
        for line in lines.iter().copied().filter(|line| *line != title) {
            posted = posted.or_else(|| line.contains("days ago").then(|| line.to_string()));
            kind = kind.or_else(|| {
                ["Full Time", "Part Time"]
                    .into_iter()
                    .find(|label| line.contains(label))
            });
            if location.is_none() && ["Park City", "Utah", "UT"].iter().any(|place| line.contains(place)) {
                location = Some(line.to_string());
            }
        }

        Ok((
            title,
            location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            kind.unwrap_or(DEFAULT_TYPE).to_string(),
            posted.unwrap_or_else(|| DEFAULT_POSTED.to_string()),
        ))
    }

    pub fn parse_details(&self, html: &str) -> AdpDetails {
        let document = Html::parse_document(html);
        let root = document.root_element();
        AdpDetails {
            description: self.description.value(root),
            requirements: self.requirements.value(root),
        }
    }
}

pub struct AdpCollector<C: Clock = SystemClock> {
    portal: Url,
    selectors: AdpSelectors,
    ready: Wait,
    detail: Wait,
    posted_at: NaiveDate,
    clock: C,
}

impl AdpCollector<SystemClock> {
    /// `posted_at` is stamped on every posting.
    pub fn new(config: &CollectorConfig, posted_at: NaiveDate) -> Result<Self, CollectError> {
        let portal = Url::parse(&config.adp_url).map_err(|source| CollectError::Url {
            url: config.adp_url.clone(),
            source,
        })?;

        Ok(Self {
            portal,
            selectors: AdpSelectors::workforce_now()?,
            ready: Wait::every(std::time::Duration::from_millis(500)).with_timeout(config.results_timeout),
            detail: Wait::every(std::time::Duration::from_millis(250)).with_timeout(config.detail_delay),
            posted_at,
            clock: SystemClock,
        })
    }
}

impl<C: Clock> AdpCollector<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> AdpCollector<D> {
        AdpCollector {
            portal: self.portal,
            selectors: self.selectors,
            ready: self.ready,
            detail: self.detail,
            posted_at: self.posted_at,
            clock,
        }
    }

    /// Loads the portal, waits for the posting elements, then opens every
    /// posting's apply URL.
    ///
    /// A posting whose page fails to load is still emitted, with the generic
    /// description and requirements.
    pub fn collect<P: Page + ?Sized>(&self, page: &P) -> Result<ExtractionReport<Posting>, CollectError> {
        let portal = self.portal.as_str();
        tracing::info!(url = portal, "navigating to ADP portal");
        page.navigate(portal).map_err(CollectError::browser)?;

        let listings = self
            .ready
            .until(&self.clock, || {
                page.content().map(|html| {
                    let listings = self.selectors.parse_listings(&html);
                    (!listings.records.is_empty()).then_some(listings)
                })
            })
            .map_err(|err| CollectError::waiting(err, "the job postings"))?;
        tracing::info!(count = listings.records.len(), "found job postings");

        let mut report = ExtractionReport {
            records: Vec::with_capacity(listings.records.len()),
            issues: listings.issues,
        };
        let total = listings.records.len();
        for (index, listing) in listings.records.into_iter().enumerate() {
            tracing::info!("scraping details {}/{}: {} ({})", index + 1, total, listing.title, listing.job_id);
            let details = match self.visit_posting(page, &listing) {
                Ok(details) => {
                    for (field, value) in [("description", &details.description), ("requirements", &details.requirements)] {
                        if value.is_none() {
                            report.push_issue(
                                listing.position,
                                Stage::Detail,
                                Some(listing.title.as_str()),
                                IssueKind::MissingField(field),
                            );
                        }
                    }
                    details
                }
                Err(kind) => {
                    report.push_issue(listing.position, Stage::Detail, Some(listing.title.as_str()), kind);
                    AdpDetails::default()
                }
            };
            report
                .records
                .push(listing.to_posting(portal, details, self.posted_at));
        }

        Ok(report)
    }

    fn visit_posting<P: Page + ?Sized>(&self, page: &P, listing: &AdpListing) -> Result<AdpDetails, IssueKind> {
        let navigation = |err: anyhow::Error| IssueKind::Navigation(format!("{err:#}"));
        page.navigate(&apply_url(self.portal.as_str(), &listing.job_id))
            .map_err(navigation)?;

        match self.detail.until(&self.clock, || {
            page.has_element(DETAIL_READY).map(|present| present.then_some(()))
        }) {
            Ok(()) | Err(WaitError::TimedOut { .. }) => {}
            Err(WaitError::Probe(err)) => return Err(navigation(err)),
        }

        let html = page.content().map_err(navigation)?;
        Ok(self.selectors.parse_details(&html))
    }
}
