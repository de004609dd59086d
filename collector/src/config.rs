use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_TARGET_URL: &str = "https://www.linkedin.com/company/poweredbymrp/jobs/";
/// Powered By MRP's ADP Workforce Now recruitment portal.
pub const DEFAULT_ADP_URL: &str = "https://workforcenow.adp.com/mascsr/default/mdf/recruitment/recruitment.html?cid=7a229a23-b938-47ed-bc95-636e054d62a6&ccId=19000101_000001&lang=en_US";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Job titles the selector-fallback collector searches for in raw page text.
pub const DEFAULT_FALLBACK_KEYWORDS: [&str; 7] = [
    "Ecommerce Specialist",
    "Supply Chain Manager",
    "Director of Sales and Operations",
    "Depot Service and Sales Operations Manager",
    "Ecommerce Manager",
    "Clinical Trainer",
    "Field Training Team",
];

/// Runtime settings shared by the collector binaries.
///
/// Every value has a built-in default so the binaries run without arguments;
/// environment variables (or a `.env` file) override them.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub target_url: String,
    pub adp_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub chrome_path: Option<PathBuf>,
    pub results_timeout: Duration,
    pub scroll_interval: Duration,
    pub detail_delay: Duration,
    pub fallback_keywords: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            adp_url: DEFAULT_ADP_URL.to_string(),
            output_dir: PathBuf::from("."),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
            results_timeout: Duration::from_secs(10),
            scroll_interval: Duration::from_secs(2),
            detail_delay: Duration::from_secs(2),
            fallback_keywords: DEFAULT_FALLBACK_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl CollectorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let seconds = |key: &str, default: Duration| -> Result<Duration> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{key} must be a whole number of seconds")),
                None => Ok(default),
            }
        };

        Ok(Self {
            target_url: lookup("MRP_TARGET_URL").unwrap_or(defaults.target_url),
            adp_url: lookup("MRP_ADP_URL").unwrap_or(defaults.adp_url),
            output_dir: lookup("MRP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            user_agent: lookup("MRP_USER_AGENT").unwrap_or(defaults.user_agent),
            chrome_path: lookup("MRP_CHROME_PATH").map(PathBuf::from),
            results_timeout: seconds("MRP_RESULTS_TIMEOUT_SECS", defaults.results_timeout)?,
            scroll_interval: seconds("MRP_SCROLL_POLL_SECS", defaults.scroll_interval)?,
            detail_delay: seconds("MRP_DETAIL_DELAY_SECS", defaults.detail_delay)?,
            fallback_keywords: lookup("MRP_FALLBACK_KEYWORDS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.fallback_keywords),
        })
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = CollectorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
        assert_eq!(config.adp_url, DEFAULT_ADP_URL);
        assert_eq!(config.results_timeout, Duration::from_secs(10));
        assert_eq!(config.fallback_keywords.len(), 7);
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = CollectorConfig::from_lookup(lookup(&[
            ("MRP_OUTPUT_DIR", "out"),
            ("MRP_ADP_URL", "https://careers.example.com/portal?cid=1"),
            ("MRP_SCROLL_POLL_SECS", "5"),
            ("MRP_FALLBACK_KEYWORDS", "Clinical Trainer, ,Ecommerce Manager"),
        ]))
        .unwrap();

        assert_eq!(config.output_path("mrp_jobs.json"), PathBuf::from("out/mrp_jobs.json"));
        assert_eq!(config.scroll_interval, Duration::from_secs(5));
        assert_eq!(config.adp_url, "https://careers.example.com/portal?cid=1");
        assert_eq!(config.fallback_keywords, vec!["Clinical Trainer", "Ecommerce Manager"]);
    }

    #[test]
    fn test_bad_duration_is_rejected() {
        let err = CollectorConfig::from_lookup(lookup(&[("MRP_DETAIL_DELAY_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("MRP_DETAIL_DELAY_SECS"));
    }
}
