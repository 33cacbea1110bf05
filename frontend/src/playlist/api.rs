use crate::models::PlaylistFeed;
use crate::playlist::feed::parse_feed;
use crate::utils::proxied_feed_url;
use async_trait::async_trait;
use gloo_net::http::Request;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),
    #[error("feed request failed with HTTP {0}")]
    Status(u16),
    #[error("feed could not be parsed: {0}")]
    Parse(String),
}

/// Where playlist feeds come from.
#[async_trait(?Send)]
pub trait PlaylistSource {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<PlaylistFeed, FeedError>;
}

/// Fetches the public XML feed through a CORS relay.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpFeedSource {
    proxy_prefix: String,
}

impl HttpFeedSource {
    pub fn new(proxy_prefix: impl Into<String>) -> Self {
        Self {
            proxy_prefix: proxy_prefix.into(),
        }
    }
}

#[async_trait(?Send)]
impl PlaylistSource for HttpFeedSource {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<PlaylistFeed, FeedError> {
        let url = proxied_feed_url(&self.proxy_prefix, playlist_id);
        log::debug!("Fetching feed: {url}");

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FeedError::Status(response.status()));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        parse_feed(&xml).map_err(|e| FeedError::Parse(e.to_string()))
    }
}
