use std::path::PathBuf;

use queuekit_models::ModelError;
use thiserror::Error;

/// Errors that stop a report from being produced.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid arguments: {0}")]
    Args(String),

    #[error("failed to read scenario {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario")]
    Parse(#[from] toml::de::Error),

    #[error("scenario does not describe a valid model")]
    Model(#[from] ModelError),

    #[error("failed to encode report as JSON")]
    Json(#[from] serde_json::Error),
}
