use thiserror::Error;

pub type Result<T> = std::result::Result<T, WarpcastError>;

#[derive(Debug, Error)]
pub enum WarpcastError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed cast at position {position}, field `{field}`: {message}")]
    MalformedCast {
        position: usize,
        field: &'static str,
        message: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for WarpcastError {
    fn from(err: reqwest::Error) -> Self {
        WarpcastError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WarpcastError {
    fn from(err: serde_json::Error) -> Self {
        WarpcastError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for WarpcastError {
    fn from(err: std::io::Error) -> Self {
        WarpcastError::Io(err.to_string())
    }
}
