use std::{env, path::PathBuf, time::Duration};

use crate::error::{Result, ScrapeError};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; BlogScraper/1.0; +https://github.com/yourname/blog-scraper)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT_DIR: &str = "workspace/scrapped websites";

/// Article container patterns, most specific first.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".post",
    ".entry-content",
    ".post-content",
    ".article-body",
    "#content",
];

/// Elements stripped from the located container before conversion.
pub const DEFAULT_CLUTTER_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

const OUTPUT_DIR_ENV: &str = "BLOG_SCRAPER_OUTPUT_DIR";
const USER_AGENT_ENV: &str = "BLOG_SCRAPER_USER_AGENT";
const TIMEOUT_ENV: &str = "BLOG_SCRAPER_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
    pub content_selectors: Vec<String>,
    pub clutter_tags: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            content_selectors: DEFAULT_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            clutter_tags: DEFAULT_CLUTTER_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScraperConfig {
    /// Defaults, overridden by `.env` / process environment where set.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            self.user_agent = agent;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ScrapeError::Config(format!("{TIMEOUT_ENV} must be a positive integer, got {raw:?}"))
                })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }
}
