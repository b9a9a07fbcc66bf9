pub mod config;
pub mod content;
pub mod error;
pub mod fetcher;
pub mod markdown;
pub mod metadata;
pub mod utils;

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;
use url::Url;

pub use config::ScraperConfig;
pub use error::{Result, ScrapeError};

use content::{ContentLocator, Sanitizer};
use fetcher::Fetcher;

/// Raw HTML as served for `url`.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleMetadata {
    /// Empty when the page has neither `<title>` nor `og:title`.
    pub title: String,
    pub date: Option<NaiveDate>,
}

/// Final markdown and where it goes.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub path: PathBuf,
    pub contents: String,
}

/// Rejects anything `url` can't parse as an absolute URL, which includes
/// input without a scheme.
pub fn validate_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim())
        .map_err(|_| ScrapeError::Usage("Please provide a full URL including http/https.".into()))
}

/// Turns already-fetched HTML into the markdown document for `url`.
pub fn convert_page(config: &ScraperConfig, page: &Page) -> Result<OutputDocument> {
    let locator = ContentLocator::new(config.content_selectors.as_slice())?;
    let sanitizer = Sanitizer::new(config.clutter_tags.as_slice())?;

    let document = scraper::Html::parse_document(&page.html);
    let meta = metadata::extract_metadata(&document);
    info!(title = meta.title.as_str(), date = ?meta.date, "metadata extracted");

    let main_html = locator.locate_main_content(&document);
    let cleaned = sanitizer.sanitize(&main_html);
    let body = markdown::to_markdown(&cleaned)?;

    Ok(utils::build_output(
        &config.output_dir,
        &meta.title,
        meta.date,
        &body,
        &page.url,
    ))
}

/// Fetch, extract, convert and write. Returns the absolute output path.
/// `url` is fetched and attributed exactly as given.
pub async fn process_url(config: &ScraperConfig, url: &str) -> Result<PathBuf> {
    validate_url(url)?;
    let fetcher = Fetcher::new(config)?;
    let page = fetcher.fetch(url).await?;
    let output = convert_page(config, &page)?;
    utils::save_text(&output)
}
