//! HTTP implementation of [`Backend`] over the site's REST API.
//!
//! Every response is wrapped in `{ success, data, message }`. A non-2xx
//! status becomes `ApiError::Api`, `success: false` becomes
//! `ApiError::Rejected`.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::backend::{ApiError, Backend};
use super::types::{ApiEnvelope, Preferences, RecommendationRequest, RecommendationResult};

pub const PREFERENCES_PATH: &str = "/api/v1/user/preferences";
pub const GENERATE_PATH: &str = "/api/v1/recommendations/generate";

pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn require_token(&self) -> Result<&str, ApiError> {
        self.token
            .as_deref()
            .ok_or_else(|| ApiError::Config("login token required for preferences".into()))
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Sends the request and unwraps the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status.as_u16(), body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !envelope.success {
            let message = envelope
                .message
                .clone()
                .unwrap_or_else(|| "request failed".to_string());
            warn!("Backend rejected request: {}", message);
            return Err(ApiError::Rejected(message));
        }
        Ok(envelope)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn get_preferences(&self) -> Result<Preferences, ApiError> {
        self.require_token()?;
        info!("GET {}", PREFERENCES_PATH);
        let builder = self.with_auth(self.client.get(self.url(PREFERENCES_PATH)));
        let envelope: ApiEnvelope<Preferences> = self.send(builder).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), ApiError> {
        self.require_token()?;
        info!(
            "PUT {}: include={:?}, exclude={:?}",
            PREFERENCES_PATH, preferences.include_numbers, preferences.exclude_numbers
        );
        let builder = self.with_auth(self.client.put(self.url(PREFERENCES_PATH)).json(preferences));
        let _: ApiEnvelope<Preferences> = self.send(builder).await?;
        Ok(())
    }

    async fn generate_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, ApiError> {
        info!(
            "POST {}: total_count={}, manual={}",
            GENERATE_PATH,
            request.total_count,
            request.manual_combinations.len()
        );
        let builder = self.with_auth(self.client.post(self.url(GENERATE_PATH)).json(request));
        let envelope: ApiEnvelope<RecommendationResult> = self.send(builder).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::Parse("response missing data".into()))
    }
}
