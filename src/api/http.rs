//! HTTP client wrapping every call to the NovaBites REST API

use super::{ApiError, ApiResult};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// HTTP client for the NovaBites backend.
///
/// Cloning is cheap and clones share the bearer token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set or clear the authentication token
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    /// Join the base URL and a path without doubling slashes
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);
        let mut request = self.client.request(method, &url);

        if let Some(token) = self.token() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::decode_json(Self::check_status(response).await?).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode_json(Self::check_status(response).await?).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send_json(Method::POST, path, body).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Make a DELETE request, ignoring any response body
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// POST a JSON body and return the raw response bytes
    pub async fn post_bytes<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Vec<u8>> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST a JSON body and return the response as text
    pub async fn post_text<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<String> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }

    /// POST credentials and return the response as text.
    ///
    /// Unlike [`post_text`](Self::post_text), a 401 carrying a `message` is a
    /// rejected login rather than an expired session, so the message is kept.
    pub async fn post_credentials<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<String> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(match body_message(&body) {
                Some(message) => {
                    log::warn!("Credentials rejected: {}", message);
                    ApiError::Http { status: 401, message }
                }
                None => ApiError::Unauthorized,
            });
        }
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.request(method, path).json(body).send().await?;
        Self::decode_json(Self::check_status(response).await?).await
    }

    /// Map non-success statuses to [`ApiError`]
    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Request rejected with 401, session expired");
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        log::error!("API error {}: {}", status.as_u16(), message);
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        // an empty body decodes like `null` so optional lookups read as None
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The `message` field of an error body, if any.
///
/// Validation errors may carry `message` as a list of strings, which are joined.
pub fn body_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        serde_json::Value::Array(items) if !items.is_empty() => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            Some(parts.join(", "))
        }
        _ => None,
    }
}

/// Error text for a failed response: the body's `message` when present
pub fn error_message(status: StatusCode, body: &str) -> String {
    body_message(body).unwrap_or_else(|| {
        format!(
            "Error {} al realizar la solicitud: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
    })
}
