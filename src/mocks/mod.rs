//! Mock transport for testing.

use crate::errors::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
    /// Whether to mark the body as JSON.
    pub json: bool,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: Bytes::from(body.to_string()),
            json: true,
        }
    }

    /// Creates a response with an arbitrary status and body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: Bytes::from(body.to_string()),
            json: false,
        }
    }

    fn into_http_response(self) -> HttpResponse {
        let mut headers = HeaderMap::new();
        if self.json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let status = StatusCode::from_u16(self.status).expect("valid status code");
        HttpResponse::new(status, headers, self.body)
    }
}

enum Outcome {
    Response(MockResponse),
    Error(TransportError),
}

/// Transport that records requests and replays queued outcomes.
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Adds a response to the queue.
    pub fn enqueue_response(&self, response: MockResponse) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Response(response));
    }

    /// Adds a transport failure to the queue.
    pub fn enqueue_error(&self, error: TransportError) {
        self.outcomes.lock().unwrap().push_back(Outcome::Error(error));
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no mock response queued");

        match outcome {
            Outcome::Response(response) => Ok(response.into_http_response()),
            Outcome::Error(error) => Err(error),
        }
    }
}
