use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::error::CastgraphError;

pub const DEFAULT_WARPLEY_BASE_URL: &str =
    "https://warpley.netlify.app/.netlify/functions/warpcast-api";

/// Application configuration loaded from environment variables.
/// Every value has a default; CLI flags override what is loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    // Feed source
    pub warpley_base_url: String,
    pub channel_id: String,
    pub follower_limit: u32,
    pub cast_limit: u32,
    pub total_cast_limit: u32,

    // Export
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, CastgraphError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CastgraphError> {
        Ok(Self {
            warpley_base_url: lookup("WARPLEY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WARPLEY_BASE_URL.to_string()),
            channel_id: lookup("CHANNEL_ID").unwrap_or_else(|| "page".to_string()),
            follower_limit: parsed(&lookup, "FOLLOWER_LIMIT", 30)?,
            cast_limit: parsed(&lookup, "CAST_LIMIT", 50)?,
            total_cast_limit: parsed(&lookup, "TOTAL_CAST_LIMIT", 100)?,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("castgraph-out")),
        })
    }

    pub fn log_summary(&self) {
        info!(
            base_url = self.warpley_base_url.as_str(),
            channel_id = self.channel_id.as_str(),
            follower_limit = self.follower_limit,
            cast_limit = self.cast_limit,
            total_cast_limit = self.total_cast_limit,
            output_dir = %self.output_dir.display(),
            "Loaded config"
        );
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, CastgraphError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CastgraphError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}
