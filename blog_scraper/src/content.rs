use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Result, ScrapeError};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Picks the article container by trying selector patterns in order.
pub struct ContentLocator {
    selectors: Vec<(String, Selector)>,
}

impl ContentLocator {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let selectors = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Selector::parse(pattern)
                    .map(|selector| (pattern.to_string(), selector))
                    .map_err(|e| {
                        ScrapeError::Config(format!("invalid content selector {pattern:?}: {e}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { selectors })
    }

    /// Outer HTML of the first match, else of `<body>`, else empty.
    pub fn locate_main_content(&self, document: &Html) -> String {
        for (pattern, selector) in &self.selectors {
            if let Some(container) = document.select(selector).next() {
                debug!(selector = pattern.as_str(), "main content container found");
                return container.html();
            }
        }

        debug!("no content selector matched, falling back to <body>");
        document
            .select(&BODY)
            .next()
            .map(|body| body.html())
            .unwrap_or_default()
    }
}

/// Strips clutter elements from a markup fragment.
pub struct Sanitizer {
    clutter: Option<Selector>,
}

impl Sanitizer {
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Result<Self> {
        let group = tags
            .iter()
            .map(|tag| tag.as_ref().trim())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if group.is_empty() {
            return Ok(Self { clutter: None });
        }

        let clutter = Selector::parse(&group)
            .map_err(|e| ScrapeError::Config(format!("invalid clutter tag list {group:?}: {e}")))?;
        Ok(Self {
            clutter: Some(clutter),
        })
    }

    pub fn sanitize(&self, fragment: &str) -> String {
        let mut parsed = Html::parse_fragment(fragment);

        if let Some(clutter) = &self.clutter {
            let doomed: Vec<_> = parsed.select(clutter).map(|el| el.id()).collect();
            debug!(removed = doomed.len(), "stripping clutter elements");
            for id in doomed {
                // Nested matches are detached along with their ancestor.
                if let Some(mut node) = parsed.tree.get_mut(id) {
                    node.detach();
                }
            }
        }

        parsed.root_element().inner_html()
    }
}
