//! Core types for the Yahoo Finance news proxy
//!
//! This crate defines the shared data structures used across the proxy:
//! the flat news record, the response envelope and the upstream error type.

pub mod error;
pub mod news;

pub use error::{FeedError, FeedResult};
pub use news::{NewsFeed, NewsItem, DEFAULT_LINK, DEFAULT_PUB_DATE, DEFAULT_TITLE};
