//! Selector-fallback collector.
//!
//! One GET of the company jobs page, then an ordered list of container
//! selectors to find listing elements. When no container matches, the raw page
//! text is searched for known job titles instead.

use common::{ExtractionReport, IssueKind, JobRecord, Stage};
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use url::Url;

use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::strategy::{selector, FieldChain, Read};
use crate::{COMPANY_LOCATION, COMPANY_NAME};

/// Tried in order; the first selector with any matches wins.
pub const CONTAINER_SELECTORS: [&str; 5] = [
    ".jobs-search-results__list-item",
    ".job-search-card",
    ".jobs-unified-top-card",
    "[data-job-id]",
    ".job-card-container",
];

/// Source tag on records recovered by keyword search.
pub const FALLBACK_SOURCE: &str = "extracted_from_content";

/// Container selectors plus the per-field strategy chains applied inside
/// each matched container.
#[derive(Debug, Clone)]
pub struct SelectorCatalog {
    containers: Vec<(&'static str, Selector)>,
    pub title: FieldChain,
    pub job_url: FieldChain,
    pub company: FieldChain,
    pub location: FieldChain,
    pub posted_time: FieldChain,
}

impl SelectorCatalog {
    pub fn linkedin() -> Result<Self, CollectError> {
        let containers = CONTAINER_SELECTORS
            .iter()
            .map(|css| Ok((*css, selector(css)?)))
            .collect::<Result<Vec<_>, CollectError>>()?;

        Ok(Self {
            containers,
            title: FieldChain::of(
                "title",
                Read::Text,
                &[
                    ".job-search-card__title",
                    ".jobs-unified-top-card__job-title",
                    "h3 a",
                    ".job-title",
                    r#"a[data-control-name="job_card_click"]"#,
                ],
            )?,
            job_url: FieldChain::of(
                "job_url",
                Read::Attr("href"),
                &[
                    "h3 a",
                    r#"a[data-control-name="job_card_click"]"#,
                    "a.base-card__full-link",
                ],
            )?,
            company: FieldChain::of(
                "company",
                Read::Text,
                &[
                    ".job-search-card__subtitle-link",
                    ".jobs-unified-top-card__company-name",
                    ".job-card-container__company-name",
                    ".company-name",
                ],
            )?,
            location: FieldChain::of(
                "location",
                Read::Text,
                &[
                    ".job-search-card__location",
                    ".jobs-unified-top-card__bullet",
                    ".job-card-container__metadata-item",
                    ".location",
                ],
            )?,
            posted_time: FieldChain::of(
                "posted_time",
                Read::AttrOrText("datetime"),
                &[
                    "time",
                    ".job-search-card__listdate",
                    ".jobs-unified-top-card__posted-date",
                ],
            )?,
        })
    }

    /// Builds a record from one listing element, or `None` when not a single
    /// field could be read from it.
    pub fn extract_listing(&self, element: scraper::ElementRef<'_>, base: &Url) -> Option<JobRecord> {
        let title = self.title.value(element);
        let company = self.company.value(element);
        let location = self.location.value(element);
        let posted_time = self.posted_time.value(element);

        if title.is_none() && company.is_none() && location.is_none() && posted_time.is_none() {
            return None;
        }

        let job_url = self
            .job_url
            .value(element)
            .map(|href| base.join(&href).map(|u| u.to_string()).unwrap_or(href));

        Some(JobRecord {
            company,
            location,
            posted_time,
            job_url,
            ..JobRecord::new(title.unwrap_or_default())
        })
    }
}

/// Recovers approximate records by searching page text for known job titles.
///
/// The keyword list is configuration, not discovery: this path can only ever
/// report titles someone already typed in. Every record it produces is tagged
/// with [`FALLBACK_SOURCE`] so consumers can filter them out.
#[derive(Debug, Clone)]
pub struct KeywordFallback {
    keywords: Vec<String>,
}

impl KeywordFallback {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn scan(&self, page_text: &str) -> Vec<JobRecord> {
        let haystack = page_text.to_lowercase();
        self.keywords
            .iter()
            .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
            .map(|keyword| JobRecord {
                company: Some(COMPANY_NAME.to_string()),
                location: Some(COMPANY_LOCATION.to_string()),
                posted_time: Some("Recent".to_string()),
                source: Some(FALLBACK_SOURCE.to_string()),
                ..JobRecord::new(keyword.clone())
            })
            .collect()
    }
}

pub struct SimpleCollector {
    client: Client,
    target_url: Url,
    catalog: SelectorCatalog,
    fallback: KeywordFallback,
}

impl SimpleCollector {
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectError> {
        let target_url = Url::parse(&config.target_url).map_err(|source| CollectError::Url {
            url: config.target_url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        );
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|source| CollectError::Http {
                url: config.target_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            target_url,
            catalog: SelectorCatalog::linkedin()?,
            fallback: KeywordFallback::new(config.fallback_keywords.clone()),
        })
    }

    /// Fetches the jobs page once. Anything but 200 is an error; there is no
    /// retry.
    pub fn fetch(&self) -> Result<String, CollectError> {
        let url = self.target_url.as_str();
        tracing::info!(url, "fetching LinkedIn jobs page");

        let http_error = |source| CollectError::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(http_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CollectError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(http_error)?;
        tracing::info!(bytes = body.len(), "fetched jobs page");
        Ok(body)
    }

    pub fn collect(&self) -> Result<ExtractionReport, CollectError> {
        let html = self.fetch()?;
        Ok(self.extract(&html))
    }

    /// Turns a fetched page into records. Never fails: unknown markup falls
    /// through to the keyword search.
    pub fn extract(&self, html: &str) -> ExtractionReport {
        let document = Html::parse_document(html);
        let mut report = ExtractionReport::default();

        let matched = self.catalog.containers.iter().find_map(|(name, container)| {
            let elements: Vec<_> = document.select(container).collect();
            (!elements.is_empty()).then_some((*name, elements))
        });

        let Some((container, elements)) = matched else {
            tracing::warn!("no standard job selectors matched; searching page text for known titles");
            let page_text: String = document.root_element().text().collect();
            report.records = self.fallback.scan(&page_text);
            tracing::info!(found = report.records.len(), "jobs recovered from content analysis");
            return report;
        };

        tracing::info!(count = elements.len(), selector = container, "found job elements");
        for (index, element) in elements.into_iter().enumerate() {
            match self.catalog.extract_listing(element, &self.target_url) {
                Some(job) => report.records.push(job),
                None => report.push_issue(
                    index,
                    Stage::Listing,
                    None,
                    IssueKind::UnexpectedStructure(format!(
                        "matched {container} but no field selector did"
                    )),
                ),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const JOBS_PATH: &str = "/company/poweredbymrp/jobs/";

    fn collector() -> SimpleCollector {
        SimpleCollector::new(&CollectorConfig::default()).unwrap()
    }

    /// Runs a full `collect()` against `url` off the async runtime, since the
    /// blocking client must not be created or dropped inside it.
    async fn collect_from(url: String) -> Result<ExtractionReport, CollectError> {
        tokio::task::spawn_blocking(move || {
            let config = CollectorConfig {
                target_url: url,
                ..CollectorConfig::default()
            };
            SimpleCollector::new(&config)?.collect()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_ok_status_stops_after_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(JOBS_PATH))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = collect_from(format!("{}{JOBS_PATH}", server.uri())).await;

        match result {
            Err(CollectError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected a status error, got {other:?}"),
        }
        server.verify().await;
    }

    #[tokio::test]
    async fn test_ok_page_flows_into_records() {
        let server = MockServer::start().await;
        let html = r#"<html><body><ul>
            <li class="job-search-card">
                <h3 class="job-search-card__title"><a href="/jobs/view/7">Director of Sales and Operations</a></h3>
                <a class="job-search-card__subtitle-link">Powered By MRP</a>
                <span class="job-search-card__location">Park City, Utah</span>
            </li>
        </ul></body></html>"#;
        Mock::given(method("GET"))
            .and(path(JOBS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .expect(1)
            .mount(&server)
            .await;

        let report = collect_from(format!("{}{JOBS_PATH}", server.uri())).await.unwrap();

        assert_eq!(report.records.len(), 1);
        let job = &report.records[0];
        assert_eq!(job.title, "Director of Sales and Operations");
        assert_eq!(job.location.as_deref(), Some("Park City, Utah"));
        assert_eq!(job.job_url, Some(format!("{}/jobs/view/7", server.uri())));
        assert!(job.source.is_none());

        let requests = server.received_requests().await.unwrap();
        let user_agent = requests[0].headers.get("user-agent").and_then(|v| v.to_str().ok());
        assert_eq!(user_agent, Some(DEFAULT_USER_AGENT));
    }

    #[test]
    fn test_connection_failure_is_a_transport_error() {
        // Bind then release a port so nothing is listening on it.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let config = CollectorConfig {
            target_url: format!("http://{addr}{JOBS_PATH}"),
            ..CollectorConfig::default()
        };

        let err = SimpleCollector::new(&config).unwrap().collect().unwrap_err();

        assert!(matches!(err, CollectError::Http { .. }));
    }

    #[test]
    fn test_fallback_finds_known_title_in_plain_text() {
        let html = r#"<html><body>
            <main><p>We are hiring a Supply Chain Manager in Park City.</p></main>
        </body></html>"#;

        let report = collector().extract(html);

        assert_eq!(report.records.len(), 1);
        let job = &report.records[0];
        assert_eq!(job.title, "Supply Chain Manager");
        assert_eq!(job.company.as_deref(), Some("Powered By MRP"));
        assert_eq!(job.location.as_deref(), Some("Park City, Utah"));
        assert_eq!(job.posted_time.as_deref(), Some("Recent"));
        assert_eq!(job.source.as_deref(), Some(FALLBACK_SOURCE));
    }

    #[test]
    fn test_fallback_is_case_insensitive_and_keeps_keyword_order() {
        let fallback = KeywordFallback::new(vec![
            "Ecommerce Specialist".to_string(),
            "Clinical Trainer".to_string(),
        ]);
        let jobs = fallback.scan("CLINICAL TRAINER wanted. ecommerce specialist too.");
        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Ecommerce Specialist", "Clinical Trainer"]);
    }

    #[test]
    fn test_fallback_with_no_keywords_yields_nothing() {
        let report = collector().extract("<html><body><p>About us</p></body></html>");
        assert!(report.records.is_empty());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_first_title_and_second_company_strategy() {
        let html = r#"<ul>
            <li class="job-search-card">
                <h3 class="job-search-card__title">Ecommerce Manager</h3>
                <span class="jobs-unified-top-card__company-name">Powered By MRP</span>
            </li>
        </ul>"#;

        let report = collector().extract(html);

        assert_eq!(report.records.len(), 1);
        let job = &report.records[0];
        assert_eq!(job.title, "Ecommerce Manager");
        assert_eq!(job.company.as_deref(), Some("Powered By MRP"));
        assert_eq!(job.location, None);
    }

    #[test]
    fn test_first_matching_container_selector_wins() {
        // `.job-card-container` also matches, but `[data-job-id]` comes first.
        let html = r#"
            <div data-job-id="41" class="job-card-container">
                <h3><a href="/jobs/view/41">Supply Chain Manager</a></h3>
                <time datetime="2024-07-01">1 week ago</time>
            </div>
            <div class="job-card-container"><span class="company-name">Other</span></div>
        "#;

        let report = collector().extract(html);

        assert_eq!(report.records.len(), 1);
        let job = &report.records[0];
        assert_eq!(job.title, "Supply Chain Manager");
        assert_eq!(job.posted_time.as_deref(), Some("2024-07-01"));
        assert_eq!(job.job_url.as_deref(), Some("https://www.linkedin.com/jobs/view/41"));
    }

    #[test]
    fn test_element_without_fields_is_reported_not_kept() {
        let html = r#"
            <div class="job-search-card"><span class="location">Park City, Utah</span></div>
            <div class="job-search-card"><img src="logo.png"></div>
        "#;

        let report = collector().extract(html);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].title, "");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].item, 1);
    }
}
