//! News data structures for the Yahoo Finance feed

use serde::{Deserialize, Serialize};

/// Title used when an item has no `<title>` child
pub const DEFAULT_TITLE: &str = "No Title";
/// Link used when an item has no `<link>` child
pub const DEFAULT_LINK: &str = "#";
/// Publication date used when an item has no `<pubDate>` child
pub const DEFAULT_PUB_DATE: &str = "";

/// A single feed entry, flattened to the three fields the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article headline
    pub title: String,
    /// Article URL
    pub link: String,
    /// Publication date, verbatim from the feed
    #[serde(rename = "pubDate")]
    pub pub_date: String,
}

impl NewsItem {
    /// Build an item from optionally present child texts, filling in defaults
    pub fn from_fields(
        title: Option<String>,
        link: Option<String>,
        pub_date: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            link: link.unwrap_or_else(|| DEFAULT_LINK.to_string()),
            pub_date: pub_date.unwrap_or_else(|| DEFAULT_PUB_DATE.to_string()),
        }
    }
}

/// News feed response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFeed {
    /// Items in feed order
    pub data: Vec<NewsItem>,
}

impl NewsFeed {
    pub fn new(data: Vec<NewsItem>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
