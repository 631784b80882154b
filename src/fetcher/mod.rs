pub mod http_fetcher;
pub mod rss;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// One `<item>` of a fetched document. The publish date is kept verbatim;
/// interpreting it is the ingestion pipeline's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub raw_pub_date: String,
}

/// A parsed RSS channel with its items in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub entries: Vec<FetchedEntry>,
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FeedDocument>;
}
