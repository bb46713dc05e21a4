//! Yahoo Finance RSS client
//!
//! Fetches the Yahoo Finance news index feed and flattens its items.

use reqwest::{header, Client};
use tracing::{debug, info};

use newsfeed_core::{FeedError, FeedResult, NewsFeed};

use crate::parser::parse_channel_items;

/// Yahoo Finance news index feed
pub const YAHOO_NEWS_RSS_URL: &str = "https://finance.yahoo.com/news/rssindex";

/// Yahoo rejects requests that do not look like they come from a browser
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Yahoo Finance RSS client
#[derive(Debug, Clone)]
pub struct YahooNewsClient {
    client: Client,
    url: String,
}

impl YahooNewsClient {
    /// Create a client for the Yahoo Finance news index
    pub fn new() -> Self {
        Self::with_url(YAHOO_NEWS_RSS_URL)
    }

    /// Create a client that reads the feed from another URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Feed URL this client reads from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the feed and map every `channel/item` to a [`NewsItem`](newsfeed_core::NewsItem)
    pub async fn fetch_news(&self) -> FeedResult<NewsFeed> {
        let content = self.fetch_raw().await?;

        let items = parse_channel_items(&content)?;
        info!("Fetched {} news items from {}", items.len(), self.url);

        Ok(NewsFeed::new(items))
    }

    /// Fetch the raw feed body
    async fn fetch_raw(&self) -> FeedResult<Vec<u8>> {
        debug!("Fetching RSS feed: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| FeedError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::upstream_status(
                status.as_u16(),
                format!("Failed to fetch {}", self.url),
            ));
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| FeedError::request(e.to_string()))?;

        debug!("Received {} bytes from {}", content.len(), self.url);
        Ok(content.to_vec())
    }
}

impl Default for YahooNewsClient {
    fn default() -> Self {
        Self::new()
    }
}
