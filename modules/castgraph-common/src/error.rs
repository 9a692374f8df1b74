use thiserror::Error;

#[derive(Error, Debug)]
pub enum CastgraphError {
    #[error("Configuration error: {0}")]
    Config(String),
}
