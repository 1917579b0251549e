use super::config::ClientConfig;
use super::error::ClientError;
use crate::core::payload::{GenerationRequest, ServiceResponse};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// A service that turns a generation request into a raw response.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<ServiceResponse, ClientError>;
}

/// Client for an RFdiffusion NIM-style HTTP endpoint.
///
/// Sends one JSON `POST` per call. No extra headers or authentication are added. A timeout
/// applies only if the [`ClientConfig`] sets one.
#[derive(Debug, Clone)]
pub struct NimClient {
    http: reqwest::Client,
    endpoint: String,
    check_status: bool,
}

impl NimClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: super::build_http_client(config.timeout)?,
            endpoint: config.endpoint.clone(),
            check_status: config.check_status,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationService for NimClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<ServiceResponse, ClientError> {
        info!("Submitting generation request to {}", self.endpoint);
        debug!(
            "Request parameters: contigs='{}', hotspot_res={:?}, diffusion_steps={}",
            request.params.contigs, request.params.hotspot_res, request.params.diffusion_steps
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(ClientError::request(&self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            if self.check_status {
                return Err(ClientError::Status {
                    url: self.endpoint.clone(),
                    status: status.as_u16(),
                });
            }
            warn!("Generation service returned status {}", status);
        }

        let body = response
            .text()
            .await
            .map_err(ClientError::request(&self.endpoint))?;
        debug!("Received {} bytes from generation service", body.len());

        Ok(ServiceResponse::new(
            status.as_u16(),
            status.canonical_reason().map(str::to_string),
            body,
        ))
    }
}
