use super::params::GenerationParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters of the raw response body shown in previews.
pub const RESPONSE_PREVIEW_CHARS: usize = 200;

/// JSON body of a generation request.
///
/// Serializes to an object with exactly four keys: `input_pdb`, `contigs`,
/// `hotspot_res` and `diffusion_steps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub input_pdb: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(input_pdb: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            input_pdb: input_pdb.into(),
            params,
        }
    }
}

/// Parsed body of a successful generation response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationResponse {
    pub output_pdb: String,
}

/// Raw HTTP response from the generation service.
///
/// The status is recorded but not checked here. Callers decide whether a non-2xx status
/// is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    /// Canonical reason phrase, for log messages only.
    pub reason: Option<String>,
    pub body: String,
}

impl ServiceResponse {
    pub fn new(status: u16, reason: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The first `max_chars` characters of the raw body.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.body.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }

    /// Parses the body as a [`GenerationResponse`].
    pub fn parse(&self) -> Result<GenerationResponse, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl fmt::Display for ServiceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Response [{}]>", self.status)
    }
}
