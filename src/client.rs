//! Currents API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Pagination helpers that build on it live in [`crate::pagination`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{CurrentsError, Result};

const DEFAULT_API_URL: &str = "https://api.currents.dev/v1";
const USER_AGENT: &str = concat!("currentsapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Currents API client.
///
/// Handles authentication and HTTP requests against a fixed base URL.
/// Paths passed to request methods are backend-relative; any query string
/// they carry is sent as-is and not re-encoded.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use currentsapi::CurrentsClient;
///
/// # fn example() -> currentsapi::Result<()> {
/// // Create from environment variables
/// let client = CurrentsClient::from_env()?;
///
/// // Or configure manually
/// let client = CurrentsClient::new("your-api-key", "https://api.currents.dev/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CurrentsClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for CurrentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CurrentsClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CURRENTS_API_KEY` for authentication and optionally
    /// `CURRENTS_API_URL` for the base URL (defaults to
    /// `https://api.currents.dev/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `CURRENTS_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CURRENTS_API_KEY").map_err(|_| {
            CurrentsError::ConfigMissing("CURRENTS_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("CURRENTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CurrentsError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_response(response).await
    }

    /// Make a PUT request without a body.
    ///
    /// Used by state-toggle endpoints like `actions/{id}/enable`.
    #[tracing::instrument(skip(self))]
    pub async fn put_empty(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check_response(response).await
    }

    /// Make a GET request and parse the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        response.json().await.map_err(CurrentsError::HttpError)
    }

    /// Make a GET request with query parameters and parse the body as JSON.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.get_with_query(path, query).await?;
        response.json().await.map_err(CurrentsError::HttpError)
    }

    /// Make a POST request and parse the body as JSON.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.post(path, body).await?;
        response.json().await.map_err(CurrentsError::HttpError)
    }

    fn transport_error(err: reqwest::Error) -> CurrentsError {
        tracing::error!(error = %err, "transport failure");
        CurrentsError::HttpError(err)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::error!(status = status.as_u16(), "HTTP error response");

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(CurrentsError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(CurrentsError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = CurrentsClient::new("test-token", "https://api.currents.dev/v1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("CurrentsClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = CurrentsClient::new("token", "https://api.currents.dev/v1").unwrap();
        let client2 = CurrentsClient::new("token", "https://api.currents.dev/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_from_env_missing_key() {
        // Only run when the variable is genuinely absent to avoid
        // interfering with developer environments.
        if env::var("CURRENTS_API_KEY").is_err() {
            let err = CurrentsClient::from_env().unwrap_err();
            assert!(matches!(err, CurrentsError::ConfigMissing(_)));
        }
    }
}
