use thiserror::Error;

/// Error kinds produced by the pipeline core.
///
/// Only [`PipelineError::Validation`] and [`PipelineError::Store`] are meant to surface to an
/// external caller (see the propagation policy in the design notes); everything else is caught
/// and recovered internally so ingestion keeps making forward progress.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transient fetch error for {url}: {source}")]
    TransientFetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to parse article at {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("analysis error for article {article_id}: {reason}")]
    Analysis { article_id: String, reason: String },

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
