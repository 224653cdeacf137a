//! Error types for the SendoraCity provider.
//!
//! Errors are layered the same way requests are: [`ApiError`] is the
//! classified HTTP failure produced by the API client, [`ClientError`] adds
//! transport failures next to it, and [`ProviderError`] is what every
//! provider operation returns.

use thiserror::Error;

/// A classified API failure: the response status plus a readable message.
///
/// Built by the client for every response that is neither a success
/// (`200`/`201`) nor a soft `404`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error code {code}: {message}")]
pub struct ApiError {
    code: u16,
    message: String,
}

impl ApiError {
    /// Create a classified error for the given status code.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The HTTP status code returned by the API.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The message derived from the response.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by [`ApiClient`](crate::client::ApiClient) verbs.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be built or sent, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status classified as a failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    /// The HTTP status code, when the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Api(err) => Some(err.code()),
        }
    }
}

/// Errors that can occur in provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested entity does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The input was rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider is missing or has conflicting configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource or data source type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// The API answered successfully but the payload is unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A payload could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API client failed.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Configuration(msg)
            | Self::UnknownResource(msg)
            | Self::InvalidResponse(msg) => msg,
            Self::Serialization(_err) => "serialization error (see Debug output)",
            Self::Client(ClientError::Api(err)) => err.message(),
            Self::Client(ClientError::Transport(_err)) => "transport error (see Debug output)",
        }
    }

    /// The HTTP status code behind this error, if it came from the API.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Self::Client(err) => err.status(),
            _ => None,
        }
    }
}

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        Self::Client(ClientError::Api(err))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Client(ClientError::Transport(err))
    }
}
