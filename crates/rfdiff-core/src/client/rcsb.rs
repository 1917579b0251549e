use super::config::ClientConfig;
use super::error::ClientError;
use super::progress::{Progress, ProgressReporter};
use crate::core::structure::StructureId;
use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::{debug, info, warn};

/// Upper bound on the buffer reserved from a `Content-Length` header.
const MAX_PREALLOCATED_BYTES: u64 = 16 * 1024 * 1024;

/// A remote source of structure files.
#[async_trait]
pub trait StructureSource: Send + Sync {
    /// Downloads the raw contents of the structure file for `id`.
    async fn fetch(
        &self,
        id: &StructureId,
        reporter: &ProgressReporter<'_>,
    ) -> Result<Vec<u8>, ClientError>;
}

/// Downloads structure files from the RCSB Protein Data Bank (or any server exposing the
/// same `{filename}` URL layout).
#[derive(Debug, Clone)]
pub struct RcsbClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RcsbClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: super::build_http_client(config.timeout)?,
            config: config.clone(),
        })
    }

    pub fn url_for(&self, id: &StructureId) -> String {
        self.config.download_url(&id.file_name())
    }
}

#[async_trait]
impl StructureSource for RcsbClient {
    async fn fetch(
        &self,
        id: &StructureId,
        reporter: &ProgressReporter<'_>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.url_for(id);
        info!("Downloading structure {} from {}", id, url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::request(&url))?;

        let status = response.status();
        if !status.is_success() {
            if self.config.check_status {
                return Err(ClientError::Status {
                    url,
                    status: status.as_u16(),
                });
            }
            warn!(
                "Download of {} returned status {}; saving the body as-is.",
                id, status
            );
        }

        let total_bytes = response.content_length();
        reporter.report(Progress::DownloadStart { total_bytes });

        let capacity = total_bytes.unwrap_or(0).min(MAX_PREALLOCATED_BYTES);
        let mut buffer: Vec<u8> = Vec::with_capacity(capacity as usize);
        let mut stream = response.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk = item.map_err(ClientError::request(&url))?;
            buffer.extend_from_slice(&chunk);
            reporter.report(Progress::DownloadIncrement {
                bytes: chunk.len() as u64,
            });
        }

        reporter.report(Progress::DownloadFinish);
        debug!("Downloaded {} bytes for structure {}", buffer.len(), id);
        Ok(buffer)
    }
}
