pub mod error;
mod payload;
pub mod types;

pub use error::{Result, WarpcastError};
pub use types::{Channel, ChannelsResponse, FeedQuery};

use std::path::Path;

use castgraph_common::RawCast;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Thin client for the Warpley proxy in front of the Warpcast API.
///
/// One request per call. No retries, no pagination: callers get the
/// response as-is or an error.
pub struct WarpcastClient {
    client: reqwest::Client,
    base_url: String,
}

impl WarpcastClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the follower feed for a channel. A response without a `casts`
    /// array yields an empty list.
    pub async fn fetch_casts(&self, query: &FeedQuery) -> Result<Vec<RawCast>> {
        let url = query.to_url(&self.base_url)?;
        tracing::info!(channel_id = query.channel_id.as_str(), "Fetching follower feed");

        let body = self.get_body(url).await?;
        let casts = parse_casts(&body)?;
        tracing::info!(count = casts.len(), "Fetched casts");

        Ok(casts)
    }

    /// List channels, most-followed first.
    pub async fn list_channels(&self, limit: u32) -> Result<Vec<Channel>> {
        let url = Url::parse_with_params(
            &self.base_url,
            &[("allChannels", "true".to_string()), ("limit", limit.to_string())],
        )
        .map_err(|e| WarpcastError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let response: ChannelsResponse = self.get_json(url).await?;
        let mut channels = response.channels;
        sort_by_followers(&mut channels);
        tracing::info!(count = channels.len(), "Fetched channels");

        Ok(channels)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.get_body(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_body(&self, url: Url) -> Result<String> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WarpcastError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.text().await?)
    }
}

/// Stable sort, descending by follower count. Missing counts sort as zero.
pub fn sort_by_followers(channels: &mut [Channel]) {
    channels.sort_by(|a, b| {
        b.follower_count
            .unwrap_or(0)
            .cmp(&a.follower_count.unwrap_or(0))
    });
}

/// Parse casts from JSON: either a bare array or an object with a `casts` key.
/// A cast that fails to decode is reported with its position and field.
pub fn parse_casts(json: &str) -> Result<Vec<RawCast>> {
    let payload: serde_json::Value = serde_json::from_str(json)?;
    payload::decode_casts(payload)
}

/// Offline source: read a saved feed response or cast array from disk.
pub fn load_casts_from_file(path: &Path) -> Result<Vec<RawCast>> {
    let json = std::fs::read_to_string(path)?;
    let casts = parse_casts(&json)?;
    tracing::info!(path = %path.display(), count = casts.len(), "Loaded casts from file");
    Ok(casts)
}
