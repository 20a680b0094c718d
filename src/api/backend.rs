use std::fmt;

use async_trait::async_trait;

use super::types::{Preferences, RecommendationRequest, RecommendationResult};

/// Errors that can occur while talking to the backend.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (missing token, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend returned a non-2xx status.
    Api { status: u16, message: String },
    /// Response body did not match the expected shape.
    Parse(String),
    /// HTTP 200 but `success: false` in the envelope.
    Rejected(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Rejected(msg) => write!(f, "request rejected: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The two collaborators the engine exchanges data with.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Fetches the logged-in user's include/exclude numbers.
    async fn get_preferences(&self) -> Result<Preferences, ApiError>;

    /// Stores the logged-in user's include/exclude numbers.
    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), ApiError>;

    /// Asks the recommendation service for `total_count` combinations.
    async fn generate_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, ApiError>;
}
