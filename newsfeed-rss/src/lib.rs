//! Yahoo Finance news feed client
//!
//! This crate fetches the Yahoo Finance RSS index and extracts its
//! `channel/item` entries as flat [`NewsItem`](newsfeed_core::NewsItem) records.

pub mod parser;
pub mod yahoo_news;

pub use newsfeed_core::{FeedError, FeedResult};
pub use parser::parse_channel_items;
pub use yahoo_news::{YahooNewsClient, USER_AGENT, YAHOO_NEWS_RSS_URL};
