//! Error types for the assistant client

use thiserror::Error;

use crate::error::PettyError;

/// Errors that can occur when talking to the assistant
#[derive(Debug, Error)]
pub enum AiError {
    /// AI is switched off or no API key is configured
    #[error("assistant disabled: {0}")]
    Disabled(String),

    /// The client could not be built from the configured settings
    #[error("invalid assistant configuration: {0}")]
    Config(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response
    #[error("API error ({error_type}): {message}")]
    Api { error_type: String, message: String },

    /// Authentication failed
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The response did not have the expected shape
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<AiError> for PettyError {
    fn from(err: AiError) -> Self {
        PettyError::ExternalService(err.to_string())
    }
}

/// Error body returned by the Messages API
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
