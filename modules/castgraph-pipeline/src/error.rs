use enrichment_oracle::Stage;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required field was absent. `position` is the zero-based index of the
    /// cast in the input sequence.
    #[error("Malformed cast at position {position}: missing {field}")]
    MalformedCast { position: usize, field: &'static str },

    /// Sentiment or topic extraction failed. Emotion failures never surface
    /// here; they fall back to `"unknown"`.
    #[error("{stage} enrichment failed for cast {cast_id}: {reason}")]
    Enrichment {
        stage: Stage,
        cast_id: String,
        reason: String,
    },
}
