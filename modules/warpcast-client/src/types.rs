use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WarpcastError};

/// Parameters for the follower-feed endpoint of the Warpley proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub channel_id: String,
    pub follower_limit: u32,
    pub cast_limit: u32,
    pub total_cast_limit: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            channel_id: "page".to_string(),
            follower_limit: 30,
            cast_limit: 50,
            total_cast_limit: 100,
        }
    }
}

impl FeedQuery {
    pub fn to_url(&self, base_url: &str) -> Result<Url> {
        Url::parse_with_params(
            base_url,
            &[
                ("followerFeed", "true".to_string()),
                ("channelId", self.channel_id.clone()),
                ("followerLimit", self.follower_limit.to_string()),
                ("castLimit", self.cast_limit.to_string()),
                ("totalCastLimit", self.total_cast_limit.to_string()),
            ],
        )
        .map_err(|e| WarpcastError::InvalidUrl(format!("{base_url}: {e}")))
    }
}

/// Response body of the channel listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelsResponse {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// A Farcaster channel as listed by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub url: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub lead_fid: Option<u64>,
    pub created_at: Option<i64>,
    pub follower_count: Option<u64>,
    pub member_count: Option<u64>,
    #[serde(default)]
    pub public_casting: bool,
}
