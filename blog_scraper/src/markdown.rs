//! HTML fragment to Markdown via `htmd`.
//!
//! Headers are ATX style. Anchors render as their text only; the link
//! target is dropped. Markdown-significant characters in page text are
//! escaped so they read back as literal text.

use htmd::{Element, HtmlToMarkdown};

use crate::error::{Result, ScrapeError};

pub fn to_markdown(fragment: &str) -> Result<String> {
    let converter = HtmlToMarkdown::builder()
        .add_handler(vec!["a"], |el: Element| Some(el.content.to_string()))
        .build();
    let markdown = converter
        .convert(fragment)
        .map_err(|e| ScrapeError::Markdown(e.to_string()))?;
    Ok(markdown.trim().to_string())
}
