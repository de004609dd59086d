use std::ffi::OsStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use headless_chrome::{Browser, LaunchOptions, Tab};

use super::Page;
use crate::config::CollectorConfig;

/// A headless Chrome session with a single tab.
///
/// The browser process is owned by this value and shut down when it is
/// dropped, so every exit path of a crawl releases it exactly once.
pub struct ChromePage {
    tab: Arc<Tab>,
    // Declared after `tab` so the tab handle is dropped first.
    _browser: Browser,
}

impl ChromePage {
    pub fn launch(config: &CollectorConfig) -> anyhow::Result<Self> {
        let args: Vec<&OsStr> = ["--disable-dev-shm-usage", "--disable-gpu"]
            .into_iter()
            .map(OsStr::new)
            .collect();

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .path(config.chrome_path.clone())
            .args(args)
            .build()
            .map_err(|e| anyhow!("invalid browser launch options: {e}"))?;

        let browser = Browser::new(options).context("failed to launch headless Chrome")?;
        let tab = browser.new_tab().context("failed to open browser tab")?;
        tab.set_user_agent(&config.user_agent, Some("en-US,en;q=0.5"), None)?;

        tracing::info!("browser session started");
        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    fn evaluate(&self, script: &str) -> anyhow::Result<serde_json::Value> {
        let result = self.tab.evaluate(script, false)?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }
}

impl Page for ChromePage {
    fn navigate(&self, url: &str) -> anyhow::Result<()> {
        self.tab
            .navigate_to(url)?
            .wait_until_navigated()
            .with_context(|| format!("failed to load {url}"))?;
        Ok(())
    }

    fn content(&self) -> anyhow::Result<String> {
        self.tab.get_content()
    }

    fn has_element(&self, selector: &str) -> anyhow::Result<bool> {
        let script = format!(
            "document.querySelector({}) !== null",
            serde_json::to_string(selector)?
        );
        Ok(self.evaluate(&script)?.as_bool().unwrap_or(false))
    }

    fn scroll_height(&self) -> anyhow::Result<u64> {
        self.evaluate("document.body.scrollHeight")?
            .as_u64()
            .ok_or_else(|| anyhow!("document.body.scrollHeight is not a number"))
    }

    fn scroll_to_bottom(&self) -> anyhow::Result<()> {
        self.evaluate("window.scrollTo(0, document.body.scrollHeight)")?;
        Ok(())
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        tracing::info!("browser session released");
    }
}
