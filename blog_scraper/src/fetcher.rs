use reqwest::Client;
use tracing::info;

use crate::{
    config::ScraperConfig,
    error::{Result, ScrapeError},
    Page,
};

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Single GET, no retries. Error statuses are failures.
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        info!(url, "fetching page");

        let wrap = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };

        let res = self.client.get(url).send().await.map_err(wrap)?;
        let res = res.error_for_status().map_err(wrap)?;
        let html = res.text().await.map_err(wrap)?;

        info!(url, bytes = html.len(), "page fetched");
        Ok(Page {
            url: url.to_string(),
            html,
        })
    }
}
