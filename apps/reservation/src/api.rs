//! Movie backend client
//!
//! [`MovieApi`] is what reducers depend on; [`HttpMovieApi`] talks to the
//! real backend over HTTP with JSON bodies.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{Genre, MovieSummary, ReservationReceipt, ReservationRequest};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Result of a backend call
pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future returned by [`MovieApi`] methods
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send>>;

/// Operations the client needs from the movie backend
pub trait MovieApi: Send + Sync {
    /// Every movie currently listed
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a movie list
    fn list_movies(&self) -> ApiFuture<Vec<MovieSummary>>;

    /// Movies matching a free-text query (empty allowed)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a movie list
    fn search_movies(&self, query: &str) -> ApiFuture<Vec<MovieSummary>>;

    /// Genre id to name mapping
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a genre list
    fn list_genres(&self) -> ApiFuture<Vec<Genre>>;

    /// Submit a reservation
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it
    fn create_reservation(&self, request: ReservationRequest) -> ApiFuture<ReservationReceipt>;
}

/// [`MovieApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpMovieApi {
    client: Client,
    base_url: String,
}

impl HttpMovieApi {
    /// Client for `base_url` with reqwest defaults
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client for `base_url` reusing an existing reqwest client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Client built from configuration (base URL and request timeout)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the HTTP client cannot be built
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Base URL every path is joined to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl MovieApi for HttpMovieApi {
    fn list_movies(&self) -> ApiFuture<Vec<MovieSummary>> {
        let request = self.client.get(self.url("/movies"));
        Box::pin(async move {
            tracing::debug!("Fetching movie catalog");
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            read_json(response).await
        })
    }

    fn search_movies(&self, query: &str) -> ApiFuture<Vec<MovieSummary>> {
        let request = self
            .client
            .get(self.url("/movies/search"))
            .query(&[("query", query)]);
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            read_json(response).await
        })
    }

    fn list_genres(&self) -> ApiFuture<Vec<Genre>> {
        let request = self.client.get(self.url("/genres"));
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            read_json(response).await
        })
    }

    fn create_reservation(&self, request: ReservationRequest) -> ApiFuture<ReservationReceipt> {
        let request = self.client.post(self.url("/reservations")).json(&request);
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

            let response = check_status(response).await?;
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;

            Ok(receipt_from_body(body))
        })
    }
}

/// The reservation exists once the status is 2xx; the body is kept as-is
///
/// JSON bodies are parsed, anything else is kept as a string and an empty
/// body becomes `Null`.
fn receipt_from_body(body: String) -> ReservationReceipt {
    if body.trim().is_empty() {
        return ReservationReceipt(serde_json::Value::Null);
    }

    match serde_json::from_str(&body) {
        Ok(value) => ReservationReceipt(value),
        Err(error) => {
            tracing::debug!(%error, "Reservation receipt is not JSON, keeping raw body");
            ReservationReceipt(serde_json::Value::String(body))
        },
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = HttpMovieApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.url("/movies"), "http://localhost:3000/movies");
    }

    #[test]
    fn receipt_keeps_any_success_body() {
        assert!(receipt_from_body(String::new()).0.is_null());
        assert_eq!(
            receipt_from_body(r#"{"id":7}"#.to_string()).0,
            serde_json::json!({ "id": 7 })
        );
        assert_eq!(
            receipt_from_body("Reservation created".to_string()).0,
            serde_json::Value::String("Reservation created".to_string())
        );
    }

    #[test]
    fn from_config_keeps_base_url() {
        let config = ApiConfig {
            base_url: "http://movies.internal".to_string(),
            timeout_secs: 5,
        };
        let api = HttpMovieApi::from_config(&config).unwrap();
        assert_eq!(api.base_url(), "http://movies.internal");
    }
}
