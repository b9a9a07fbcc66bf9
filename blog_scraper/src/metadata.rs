//! Title and publication-date discovery.
//!
//! The title comes from `<title>`, overridden by a non-empty `og:title`.
//! The date is taken from the first source that yields a parseable value:
//! the first `<time datetime>`, the first JSON-LD block, then the
//! `article:published_time` meta tag.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::ArticleMetadata;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[property='og:title']").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[type='application/ld+json']").unwrap());
static PUBLISHED_META: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='article:published_time']").unwrap());

type DateSource = fn(&Html) -> Option<NaiveDate>;

/// Date sources in priority order; the first hit wins.
const DATE_SOURCES: &[(&str, DateSource)] = &[
    ("time element", date_from_time_element as DateSource),
    ("json-ld", date_from_json_ld as DateSource),
    ("published_time meta", date_from_published_meta as DateSource),
];

pub fn extract_metadata(document: &Html) -> ArticleMetadata {
    let title = og_title(document)
        .or_else(|| document_title(document))
        .unwrap_or_default();

    let date = DATE_SOURCES.iter().find_map(|(name, source)| {
        let date = source(document)?;
        debug!(source = name, %date, "publication date resolved");
        Some(date)
    });

    ArticleMetadata { title, date }
}

fn document_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn og_title(document: &Html) -> Option<String> {
    document
        .select(&OG_TITLE)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

fn date_from_time_element(document: &Html) -> Option<NaiveDate> {
    let raw = document.select(&TIME).next()?.value().attr("datetime")?;
    parse_logged("time element", raw)
}

fn date_from_json_ld(document: &Html) -> Option<NaiveDate> {
    let script = document.select(&JSON_LD).next()?;
    let content = script.text().collect::<String>();

    let data = match serde_json::from_str::<Value>(content.trim()) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            debug!("json-ld block is not an object, skipping");
            return None;
        }
        Err(e) => {
            debug!(error = %e, "malformed json-ld block, skipping");
            return None;
        }
    };

    let raw = ["datePublished", "dateCreated"]
        .iter()
        .filter_map(|key| data.get(*key).and_then(Value::as_str))
        .find(|value| !value.trim().is_empty())?;
    parse_logged("json-ld", raw)
}

fn date_from_published_meta(document: &Html) -> Option<NaiveDate> {
    let raw = document.select(&PUBLISHED_META).next()?.value().attr("content")?;
    parse_logged("published_time meta", raw)
}

fn parse_logged(source: &str, raw: &str) -> Option<NaiveDate> {
    let parsed = parse_date(raw);
    if parsed.is_none() {
        debug!(source, raw, "unparseable date, trying next source");
    }
    parsed
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
];

/// Lenient date parsing. Date-times keep the calendar date as written,
/// without shifting to UTC.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.date_naive());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
