use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use scraper::{Html, Selector};

use super::Page;

/// Serves canned HTML per URL and a scripted sequence of page heights.
pub(crate) struct FakePage {
    pages: HashMap<String, String>,
    broken: HashSet<String>,
    current: RefCell<String>,
    heights: Vec<u64>,
    pub(crate) height_reads: Cell<usize>,
    pub(crate) visited: RefCell<Vec<String>>,
}

impl FakePage {
    pub(crate) fn new(heights: Vec<u64>) -> Self {
        Self {
            pages: HashMap::new(),
            broken: HashSet::new(),
            current: RefCell::new(String::new()),
            heights,
            height_reads: Cell::new(0),
            visited: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub(crate) fn with_broken(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }
}

impl Page for FakePage {
    fn navigate(&self, url: &str) -> anyhow::Result<()> {
        self.visited.borrow_mut().push(url.to_string());
        if self.broken.contains(url) {
            anyhow::bail!("net::ERR_CONNECTION_RESET");
        }
        let html = self
            .pages
            .get(url)
            .ok_or_else(|| anyhow::anyhow!("no page for {url}"))?;
        *self.current.borrow_mut() = html.clone();
        Ok(())
    }

    fn content(&self) -> anyhow::Result<String> {
        Ok(self.current.borrow().clone())
    }

    fn has_element(&self, css: &str) -> anyhow::Result<bool> {
        let selector = Selector::parse(css).map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(Html::parse_document(&self.current.borrow()).select(&selector).next().is_some())
    }

    fn scroll_height(&self) -> anyhow::Result<u64> {
        let read = self.height_reads.get();
        self.height_reads.set(read + 1);
        Ok(self.heights[read.min(self.heights.len() - 1)])
    }

    fn scroll_to_bottom(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
