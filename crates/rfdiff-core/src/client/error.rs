use super::config::ConfigError;
use crate::core::structure::StructureIdError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid structure identifier: {0}")]
    StructureId(#[from] StructureIdError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned non-success status {status}")]
    Status { url: String, status: u16 },

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed generation response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl ClientError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn request(url: &str) -> impl FnOnce(reqwest::Error) -> Self + '_ {
        move |source| Self::Request {
            url: url.to_string(),
            source,
        }
    }
}
