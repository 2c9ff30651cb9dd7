use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::neo::RawFeed;
use crate::parser::parse_feed;
use crate::services::neo_feed::FeedSource;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

/// NeoWs `feed` endpoint client. The API key is injected by the wrapped
/// [`HttpClient`], normally a [`UrlParam`] around a [`BasicClient`].
pub struct NasaFeedClient<C> {
    client: C,
    base_url: String,
}

impl NasaFeedClient<UrlParam<BasicClient>> {
    pub fn new(api_key: impl Into<String>) -> reqwest::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> reqwest::Result<Self> {
        let client = UrlParam::api_key(BasicClient::new()?, api_key);
        Ok(Self::from_client(client, base_url))
    }
}

impl<C: HttpClient> NasaFeedClient<C> {
    pub fn from_client(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn feed_url(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/neo/rest/v1/feed?start_date={}&end_date={}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )
    }
}

#[async_trait::async_trait]
impl<C: HttpClient> FeedSource for NasaFeedClient<C> {
    #[tracing::instrument(skip(self), fields(start = %start, end = %end))]
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<RawFeed> {
        let bytes = fetch_bytes(&self.client, &self.feed_url(start, end)).await?;
        let feed = parse_feed(&bytes)?;
        info!(
            days = feed.days.len(),
            records = feed.total_records(),
            "NEO feed fetched"
        );
        Ok(feed)
    }
}
