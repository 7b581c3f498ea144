//! HTTP client for the homework review API.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Credentials;
use crate::error::PollError;

/// Client issuing one `GET {endpoint}?from_date={cursor}` per poll cycle.
#[derive(Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Creates a client for the given endpoint and OAuth token.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Creates a client from loaded credentials.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(&credentials.endpoint, &credentials.practicum_token)
    }

    /// Endpoint this client polls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches homework updates newer than `cursor` (seconds since epoch).
    ///
    /// The decoded body is returned unchanged; shape checks are left to
    /// [`validate_response`](super::validate_response).
    pub async fn fetch(&self, cursor: i64) -> Result<Value, PollError> {
        debug!("Requesting {} with from_date={}", self.endpoint, cursor);

        let response = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|e| {
                let err = PollError::transport(e);
                error!("Request to review API failed: {}", err);
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(
                "Endpoint {} is unavailable, status code: {}",
                self.endpoint,
                status.as_u16()
            );
            return Err(PollError::BadStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            let err = PollError::transport(e);
            error!("Failed to read review API response body: {}", err);
            err
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Review API response is not JSON: {}", e);
            PollError::Decode(e)
        })
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
