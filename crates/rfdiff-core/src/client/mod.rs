//! HTTP transport for the structure repository and the generation service.
//!
//! Both remote ends sit behind a trait ([`StructureSource`] and [`GenerationService`]) so
//! the workflow can be driven by any implementation. The provided implementations issue a
//! single request each, with no retries.

pub mod config;
pub mod error;
pub mod progress;
pub mod rcsb;
pub mod service;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use rcsb::{RcsbClient, StructureSource};
pub use service::{GenerationService, NimClient};

use std::time::Duration;

pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ClientError::HttpClient)
}
