use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use unicode_normalization::UnicodeNormalization;
use url::Url;

use crate::{
    error::{Result, ScrapeError},
    OutputDocument,
};

const FALLBACK_SLUG: &str = "untitled";

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s_]+").unwrap());

/// Filesystem-safe name: lowercase ASCII letters, digits and single hyphens.
/// May be empty.
pub fn slugify(value: &str) -> String {
    let kept: String = value
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();
    let lowered = kept.trim().to_ascii_lowercase();
    SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug for the output file. An empty title falls back to the source URL,
/// then to a fixed name.
pub fn output_slug(title: &str, source_url: &str) -> String {
    let slug = slugify(title);
    if !slug.is_empty() {
        return slug;
    }

    let from_url = Url::parse(source_url)
        .ok()
        .map(|url| {
            let raw = format!("{} {}", url.host_str().unwrap_or(""), url.path());
            slugify(&raw.replace(['/', '.'], " "))
        })
        .unwrap_or_default();
    if from_url.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        from_url
    }
}

pub fn render_document(
    title: &str,
    date: Option<NaiveDate>,
    markdown: &str,
    source_url: &str,
) -> String {
    let mut text = format!("# {title}\n\n");
    if let Some(date) = date {
        text.push_str(&format!("*Published on {date}*\n\n"));
    }
    if !markdown.is_empty() {
        text.push_str(markdown);
        text.push_str("\n\n");
    }
    text.push_str(&format!("---\nTaken from: {source_url}\n"));
    text
}

pub fn build_output(
    output_dir: &Path,
    title: &str,
    date: Option<NaiveDate>,
    markdown: &str,
    source_url: &str,
) -> OutputDocument {
    OutputDocument {
        path: output_dir.join(format!("{}.md", output_slug(title, source_url))),
        contents: render_document(title, date, markdown, source_url),
    }
}

/// Writes the document, replacing any existing file, and returns its
/// absolute path.
pub fn save_text(document: &OutputDocument) -> Result<PathBuf> {
    if let Some(dir) = document.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
    }
    fs::write(&document.path, document.contents.as_bytes())
        .map_err(|e| ScrapeError::io(&document.path, e))?;

    let resolved =
        fs::canonicalize(&document.path).map_err(|e| ScrapeError::io(&document.path, e))?;
    info!(path = %resolved.display(), bytes = document.contents.len(), "markdown written");
    Ok(resolved)
}
