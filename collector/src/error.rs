use std::time::Duration;

use thiserror::Error;

use crate::wait::WaitError;

/// Failures that stop a collector before it produces any records.
///
/// Problems with individual listings never surface here; they are reported as
/// issues in the `ExtractionReport` instead.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("gave up waiting for {what} after {waited:?}")]
    Timeout { what: String, waited: Duration },
}

impl CollectError {
    /// headless_chrome reports everything as `anyhow::Error`; keep the whole
    /// context chain in the message.
    pub fn browser(err: anyhow::Error) -> Self {
        CollectError::Browser(format!("{err:#}"))
    }

    /// A wait on the browser that gave up, or whose probe failed.
    pub fn waiting(err: WaitError<anyhow::Error>, what: &str) -> Self {
        match err {
            WaitError::TimedOut { waited } => CollectError::Timeout {
                what: what.to_string(),
                waited,
            },
            WaitError::Probe(err) => CollectError::browser(err),
        }
    }
}
