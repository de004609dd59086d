//! Named extraction strategies and ordered per-field chains.
//!
//! A [`Strategy`] is a CSS selector plus a rule for reading a value out of the
//! first matching node. A [`FieldChain`] tries its strategies in order and
//! keeps the first non-empty result, so page redesigns are handled by adding a
//! strategy rather than rewriting the extractor.

use std::ops::Range;

use scraper::{ElementRef, Html, Selector};

use crate::error::CollectError;

/// Parses a CSS selector, mapping the error into a `CollectError`.
pub fn selector(css: &str) -> Result<Selector, CollectError> {
    Selector::parse(css).map_err(|e| CollectError::Selector {
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Text content with whitespace runs collapsed to single spaces.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a strategy reads its value from a matched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    Text,
    Attr(&'static str),
    /// The attribute when present, the text otherwise.
    AttrOrText(&'static str),
}

impl Read {
    fn value(self, element: ElementRef<'_>) -> Option<String> {
        let attr = |name: &str| {
            element
                .value()
                .attr(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let value = match self {
            Read::Text => Some(element_text(element)),
            Read::Attr(name) => attr(name),
            Read::AttrOrText(name) => attr(name).or_else(|| Some(element_text(element))),
        };
        value.filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Strategy {
    name: &'static str,
    selector: Selector,
    read: Read,
    /// Accepted value length in characters.
    length: Option<Range<usize>>,
}

impl Strategy {
    /// A strategy named after its own selector.
    pub fn css(css: &'static str, read: Read) -> Result<Self, CollectError> {
        Ok(Self {
            name: css,
            selector: selector(css)?,
            read,
            length: None,
        })
    }

    /// Only accepts values whose character count falls in `chars`. Generic
    /// selectors such as `p` or `div` need this to skip labels and wrappers.
    pub fn within(mut self, chars: Range<usize>) -> Self {
        self.length = Some(chars);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// First non-empty value among the element's descendants matching the
    /// selector.
    pub fn apply(&self, element: ElementRef<'_>) -> Option<String> {
        element
            .select(&self.selector)
            .find_map(|node| self.read.value(node).filter(|value| self.accepts(value)))
    }

    fn accepts(&self, value: &str) -> bool {
        self.length
            .as_ref()
            .map_or(true, |chars| chars.contains(&value.chars().count()))
    }

    /// Runs the strategy against a standalone markup fragment.
    pub fn extract(&self, markup: &str) -> Option<String> {
        let fragment = Html::parse_fragment(markup);
        self.apply(fragment.root_element())
    }
}

/// The value a chain produced and which strategy produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub value: String,
    pub strategy: &'static str,
}

#[derive(Debug, Clone)]
pub struct FieldChain {
    field: &'static str,
    strategies: Vec<Strategy>,
}

impl FieldChain {
    pub fn new(field: &'static str, strategies: Vec<Strategy>) -> Self {
        Self { field, strategies }
    }

    /// One strategy per selector, all reading the same way.
    pub fn of(field: &'static str, read: Read, selectors: &[&'static str]) -> Result<Self, CollectError> {
        let strategies = selectors
            .iter()
            .map(|css| Strategy::css(*css, read))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(field, strategies))
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn first_match(&self, element: ElementRef<'_>) -> Option<Match> {
        let found = self.strategies.iter().find_map(|strategy| {
            strategy.apply(element).map(|value| Match {
                value,
                strategy: strategy.name(),
            })
        });
        if let Some(found) = &found {
            tracing::trace!(field = self.field, strategy = found.strategy, "field matched");
        }
        found
    }

    pub fn value(&self, element: ElementRef<'_>) -> Option<String> {
        self.first_match(element).map(|m| m.value)
    }
}
