//! HTTP transport layer for media uploads.

use crate::auth::AuthProvider;
use crate::errors::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP transport abstraction.
///
/// Implementations own connection handling and authentication. The response
/// body must be read completely before `send` returns.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and receive a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Option<Bytes>,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a POST request without headers or body.
    pub fn post(url: Url) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Sets a header, replacing any previous value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Canonical reason phrase, or an empty string for unregistered codes.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Returns true for client and server errors.
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}

/// Reqwest-based HTTP transport implementation.
pub struct ReqwestTransport {
    client: Client,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl ReqwestTransport {
    /// Creates a new reqwest transport.
    pub fn new(client: Client) -> Self {
        Self { client, auth: None }
    }

    /// Creates a new reqwest transport with default client.
    pub fn with_defaults() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Http(format!("Failed to create client: {}", e)))?;
        Ok(Self::new(client))
    }

    /// Authenticates every request with the given provider.
    pub fn with_auth<A: AuthProvider + 'static>(mut self, provider: A) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    /// Authenticates every request with a shared provider.
    pub fn with_auth_arc(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(provider);
        self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(auth) = &self.auth {
            req = req.header(AUTHORIZATION, auth.authorization_header().await?);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(status = %status, body_len = body.len(), "Received response");

        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let url = Url::parse("https://upload.example.com/upload.json").unwrap();
        let request = HttpRequest::post(url.clone())
            .header(
                reqwest::header::CONTENT_LENGTH,
                HeaderValue::from_static("4"),
            )
            .body("data")
            .timeout(Some(Duration::from_secs(5)));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, url);
        assert_eq!(request.headers.get("content-length").unwrap(), "4");
        assert_eq!(request.body.as_deref(), Some(&b"data"[..]));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_response_status_helpers() {
        let response = HttpResponse::new(StatusCode::UNAUTHORIZED, HeaderMap::new(), Bytes::new());
        assert!(response.is_error());
        assert_eq!(response.status_text(), "Unauthorized");

        let response = HttpResponse::new(StatusCode::CREATED, HeaderMap::new(), Bytes::new());
        assert!(!response.is_error());

        let response = HttpResponse::new(
            StatusCode::from_u16(599).unwrap(),
            HeaderMap::new(),
            Bytes::new(),
        );
        assert!(response.is_error());
        assert_eq!(response.status_text(), "");
    }
}
