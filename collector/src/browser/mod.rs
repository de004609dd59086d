//! Browser-driven collector.
//!
//! Loads the listings page in a real browser, scrolls until the infinite list
//! stops growing, then visits every listing's detail page. The browser is
//! hidden behind [`Page`] and all HTML parsing works on DOM snapshots, so the
//! crawl logic runs against canned pages in tests.

mod chrome;
#[cfg(test)]
pub(crate) mod fake;

pub use chrome::ChromePage;

use common::{Benefits, ExtractionReport, IssueKind, JobRecord, Stage, NOT_SPECIFIED};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::salary::extract_salary;
use crate::strategy::{element_text, selector, Read, Strategy};
use crate::wait::{Clock, SystemClock, Wait, WaitError};

/// Element that appears once the listings have rendered.
pub const RESULTS_CONTAINER: &str = ".jobs-search-results-list";

const DESCRIPTION_NOT_AVAILABLE: &str = "Description not available";

/// A single browser tab, as far as the collector is concerned.
pub trait Page {
    fn navigate(&self, url: &str) -> anyhow::Result<()>;
    /// Serialized DOM of the current document.
    fn content(&self) -> anyhow::Result<String>;
    fn has_element(&self, selector: &str) -> anyhow::Result<bool>;
    fn scroll_height(&self) -> anyhow::Result<u64>;
    fn scroll_to_bottom(&self) -> anyhow::Result<()>;
}

/// Selectors for the listings page and the job detail page.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    listing: Selector,
    title_link: Selector,
    company: Strategy,
    location: Strategy,
    posted_time: Strategy,
    job_type: Strategy,
    description: Selector,
    requirements: Selector,
    benefits: Strategy,
    salary: Strategy,
    employment_type: Strategy,
}

/// Fields read from a detail page; `None` means the element was absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobDetails {
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub employment_type: Option<String>,
}

impl PageSelectors {
    pub fn linkedin() -> Result<Self, CollectError> {
        Ok(Self {
            listing: selector(".jobs-search-results__list-item")?,
            title_link: selector(".job-search-card__title a")?,
            company: Strategy::css(".job-search-card__subtitle-link", Read::Text)?,
            location: Strategy::css(".job-search-card__location", Read::Text)?,
            posted_time: Strategy::css("time", Read::Attr("datetime"))?,
            job_type: Strategy::css(".job-search-card__metadata-item", Read::Text)?,
            description: selector(".jobs-description-content__text")?,
            requirements: selector(".jobs-description-content__text ul li")?,
            benefits: Strategy::css(".jobs-unified-top-card__job-insight", Read::Text)?,
            salary: Strategy::css(".jobs-unified-top-card__job-insight--salary", Read::Text)?,
            employment_type: Strategy::css(
                ".jobs-unified-top-card__job-insight--employment-type",
                Read::Text,
            )?,
        })
    }

    /// Reads every listing card on a snapshot of the results page.
    ///
    /// Cards without a title link, company or location are dropped and
    /// reported; a missing posting time or job type only gets a placeholder,
    /// and an empty link text leaves the title empty. Alongside the report
    /// comes the card position of each kept record.
    pub fn parse_listings(&self, html: &str, base: &Url) -> (ExtractionReport, Vec<usize>) {
        let document = Html::parse_document(html);
        let mut report = ExtractionReport::default();
        let mut cards = Vec::new();

        for (index, card) in document.select(&self.listing).enumerate() {
            match self.parse_card(card, base) {
                Ok((job, missing)) => {
                    let title = (!job.title.is_empty()).then_some(job.title.as_str());
                    for field in missing {
                        report.push_issue(index, Stage::Listing, title, IssueKind::MissingField(field));
                    }
                    report.records.push(job);
                    cards.push(index);
                }
                Err(reason) => report.push_issue(
                    index,
                    Stage::Listing,
                    None,
                    IssueKind::UnexpectedStructure(reason),
                ),
            }
        }
        (report, cards)
    }

    fn parse_card(
        &self,
        card: ElementRef<'_>,
        base: &Url,
    ) -> Result<(JobRecord, Vec<&'static str>), String> {
        let link = card
            .select(&self.title_link)
            .next()
            .ok_or_else(|| "no title link".to_string())?;
        let title = element_text(link);
        let job_url = link
            .value()
            .attr("href")
            .map(|href| base.join(href).map(|u| u.to_string()).unwrap_or_else(|_| href.to_string()));

        let company = self.company.apply(card).ok_or_else(|| "no company".to_string())?;
        let location = self.location.apply(card).ok_or_else(|| "no location".to_string())?;

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        let mut or_placeholder = |value: Option<String>, field: &'static str| {
            value.unwrap_or_else(|| {
                missing.push(field);
                NOT_SPECIFIED.to_string()
            })
        };
        let posted_time = or_placeholder(self.posted_time.apply(card), "posted_time");
        let job_type = or_placeholder(self.job_type.apply(card), "job_type");

        let job = JobRecord {
            company: Some(company),
            location: Some(location),
            posted_time: Some(posted_time),
            job_type: Some(job_type),
            job_url,
            ..JobRecord::new(title)
        };
        Ok((job, missing))
    }

    pub fn parse_details(&self, html: &str) -> JobDetails {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let description = root
            .select(&self.description)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty());
        let requirements = root
            .select(&self.requirements)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();

        JobDetails {
            description,
            requirements,
            benefits: self.benefits.apply(root),
            salary: self.salary.apply(root),
            employment_type: self.employment_type.apply(root),
        }
    }
}

impl JobDetails {
    /// Copies the details into `job`, substituting placeholders for absent
    /// fields. Returns the names of the fields that were absent.
    pub fn apply_to(self, job: &mut JobRecord) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut or_default = |value: Option<String>, field: &'static str, default: &str| {
            value.unwrap_or_else(|| {
                missing.push(field);
                default.to_string()
            })
        };

        job.description = Some(or_default(self.description, "description", DESCRIPTION_NOT_AVAILABLE));
        job.benefits = Some(Benefits::Text(or_default(self.benefits, "benefits", NOT_SPECIFIED)));
        let salary = or_default(self.salary, "salary", NOT_SPECIFIED);
        job.employment_type = Some(or_default(self.employment_type, "employment_type", NOT_SPECIFIED));

        job.salary_min = extract_salary(&salary);
        job.salary = Some(salary);
        job.requirements = self.requirements;
        missing
    }
}

pub struct BrowserCollector<C: Clock = SystemClock> {
    target_url: Url,
    selectors: PageSelectors,
    ready: Wait,
    scroll: Wait,
    detail: Wait,
    clock: C,
}

impl BrowserCollector<SystemClock> {
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectError> {
        let target_url = Url::parse(&config.target_url).map_err(|source| CollectError::Url {
            url: config.target_url.clone(),
            source,
        })?;

        Ok(Self {
            target_url,
            selectors: PageSelectors::linkedin()?,
            ready: Wait::every(std::time::Duration::from_millis(500)).with_timeout(config.results_timeout),
            scroll: Wait::every(config.scroll_interval),
            detail: Wait::every(std::time::Duration::from_millis(250)).with_timeout(config.detail_delay),
            clock: SystemClock,
        })
    }
}

impl<C: Clock> BrowserCollector<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> BrowserCollector<D> {
        BrowserCollector {
            target_url: self.target_url,
            selectors: self.selectors,
            ready: self.ready,
            scroll: self.scroll,
            detail: self.detail,
            clock,
        }
    }

    /// Runs the whole crawl on `page`.
    ///
    /// Errors only when the listings page itself cannot be loaded. Problems
    /// with individual listings or detail pages end up in the report.
    pub fn collect<P: Page + ?Sized>(&self, page: &P) -> Result<ExtractionReport, CollectError> {
        tracing::info!(url = %self.target_url, "navigating to LinkedIn jobs page");
        page.navigate(self.target_url.as_str())
            .map_err(CollectError::browser)?;

        self.ready
            .until(&self.clock, || {
                page.has_element(RESULTS_CONTAINER)
                    .map(|present| present.then_some(()))
            })
            .map_err(|err| CollectError::waiting(err, "the results list"))?;

        tracing::info!("scrolling to load all jobs");
        let height = self
            .scroll
            .settle(&self.clock, || page.scroll_to_bottom(), || page.scroll_height())
            .map_err(|err| CollectError::waiting(err, "the page height to settle"))?;
        tracing::debug!(height, "page height settled");

        let html = page.content().map_err(CollectError::browser)?;
        let (mut report, cards) = self.selectors.parse_listings(&html, &self.target_url);
        tracing::info!(count = report.records.len(), "extracted job listings");

        let total = report.records.len();
        for (index, card) in cards.into_iter().enumerate() {
            let job = &mut report.records[index];
            tracing::info!("processing job {}/{}: {}", index + 1, total, job.title);

            let outcome = self.visit_detail(page, job);
            let title = (!job.title.is_empty()).then(|| job.title.clone());
            match outcome {
                Ok(missing) => {
                    for field in missing {
                        report.push_issue(card, Stage::Detail, title.as_deref(), IssueKind::MissingField(field));
                    }
                }
                Err(kind) => report.push_issue(card, Stage::Detail, title.as_deref(), kind),
            }
        }

        Ok(report)
    }

    fn visit_detail<P: Page + ?Sized>(
        &self,
        page: &P,
        job: &mut JobRecord,
    ) -> Result<Vec<&'static str>, IssueKind> {
        let url = job
            .job_url
            .clone()
            .ok_or_else(|| IssueKind::UnexpectedStructure("listing has no detail URL".to_string()))?;
        let navigation = |err: anyhow::Error| IssueKind::Navigation(format!("{err:#}"));

        page.navigate(&url).map_err(navigation)?;

        // The description is the last thing to render; give it the configured
        // delay and extract whatever is there afterwards.
        match self.detail.until(&self.clock, || {
            page.has_element(".jobs-description-content__text")
                .map(|present| present.then_some(()))
        }) {
            Ok(()) | Err(WaitError::TimedOut { .. }) => {}
            Err(WaitError::Probe(err)) => return Err(navigation(err)),
        }

        let html = page.content().map_err(navigation)?;
        Ok(self.selectors.parse_details(&html).apply_to(job))
    }
}
