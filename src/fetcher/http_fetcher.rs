use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{GatorError, Result};
use crate::fetcher::rss::parse_rss;
use crate::fetcher::{FeedDocument, Fetcher};

pub const USER_AGENT: &str = "gator";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FeedDocument> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_request_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatorError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_request_error(e, timeout))?;

        let doc = parse_rss(&body)?;
        tracing::debug!(url, entries = doc.entries.len(), "Fetched feed");
        Ok(doc)
    }
}

fn map_request_error(err: reqwest::Error, timeout: Duration) -> GatorError {
    if err.is_timeout() {
        GatorError::Timeout(timeout)
    } else {
        GatorError::Http(err)
    }
}
