use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DOWNLOAD_URL_TEMPLATE: &str = "https://files.rcsb.org/download/{filename}";
pub const DEFAULT_GENERATION_ENDPOINT: &str =
    "http://localhost:8000/biology/ipd/rfdiffusion/generate";

/// Placeholder in the download template that is replaced with the structure file name.
pub const FILENAME_PLACEHOLDER: &str = "{filename}";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("'{name}' must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },

    #[error("Download URL template '{0}' does not contain the {{filename}} placeholder")]
    MissingPlaceholder(String),

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub download_url_template: String,
    pub endpoint: String,
    /// `None` leaves requests without a timeout.
    pub timeout: Option<Duration>,
    /// Reject non-2xx responses instead of passing them on.
    pub check_status: bool,
}

impl ClientConfig {
    pub fn download_url(&self, file_name: &str) -> String {
        self.download_url_template
            .replace(FILENAME_PLACEHOLDER, file_name)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            download_url_template: DEFAULT_DOWNLOAD_URL_TEMPLATE.to_string(),
            endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            timeout: None,
            check_status: false,
        }
    }
}

#[derive(Default)]
pub struct ClientConfigBuilder {
    download_url_template: Option<String>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    check_status: Option<bool>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn download_url_template(mut self, template: impl Into<String>) -> Self {
        self.download_url_template = Some(template.into());
        self
    }
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn check_status(mut self, check: bool) -> Self {
        self.check_status = Some(check);
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let defaults = ClientConfig::default();

        let download_url_template = self
            .download_url_template
            .unwrap_or(defaults.download_url_template);
        validate_http_url("download-url", &download_url_template)?;
        if !download_url_template.contains(FILENAME_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(download_url_template));
        }

        let endpoint = self.endpoint.unwrap_or(defaults.endpoint);
        validate_http_url("endpoint", &endpoint)?;

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(ClientConfig {
            download_url_template,
            endpoint,
            timeout: self.timeout,
            check_status: self.check_status.unwrap_or(defaults.check_status),
        })
    }
}

fn validate_http_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        }),
    }
}
