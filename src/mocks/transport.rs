//! Mock HTTP transport for testing.

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
    /// Delay before the response is returned.
    pub delay: Option<Duration>,
}

impl MockResponse {
    /// Create a successful response with empty body.
    pub fn ok() -> Self {
        Self::error(200, Bytes::new())
    }

    /// Create a successful response with body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self::error(200, body)
    }

    /// Create a successful response with a JSON body.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::ok_with_body(body).with_header("content-type", "application/json")
    }

    /// Create a response with any status.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
            delay: None,
        }
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Hold the response back for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

enum Reply {
    Response(MockResponse),
    Failure(TransportError),
}

/// Mock HTTP transport for testing.
///
/// Replies are returned in the order they were queued; when the queue is
/// empty the default response is used, and without one the call fails with
/// a connection error.
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
    default_response: Option<MockResponse>,
}

impl MockTransport {
    /// Create a new mock transport with no responses.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: None,
        }
    }

    /// Create a mock transport with queued responses.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.queue_response(response);
        }
        transport
    }

    /// Create a mock transport with a default response.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            default_response: Some(response),
            ..Self::new()
        }
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: MockResponse) {
        self.lock_replies().push_back(Reply::Response(response));
    }

    /// Queue a transport failure.
    pub fn queue_failure(&self, error: TransportError) {
        self.lock_replies().push_back(Reply::Failure(error));
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock_requests().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Get the last request made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock_requests().last().cloned()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.lock_requests().clear();
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<HttpRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.lock_requests().push(request);

        let reply = self.lock_replies().pop_front();
        let mock = match reply {
            Some(Reply::Response(mock)) => mock,
            Some(Reply::Failure(error)) => return Err(error),
            None => match &self.default_response {
                Some(mock) => mock.clone(),
                None => {
                    return Err(TransportError::Connect {
                        message: "No mock response available".to_string(),
                    })
                }
            },
        };

        if let Some(delay) = mock.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(HttpResponse {
            status: mock.status,
            headers: mock.headers,
            body: mock.body,
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued_replies", &self.lock_replies().len())
            .field("recorded_requests", &self.lock_requests().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_returns_in_order() {
        let transport = MockTransport::with_responses(vec![
            MockResponse::ok_with_body("first"),
            MockResponse::error(404, "Not Found"),
        ]);

        let first = transport
            .send(HttpRequest::new("GET", "http://rgw/admin/user"))
            .await
            .unwrap();
        assert_eq!(first.body, Bytes::from("first"));

        let second = transport
            .send(HttpRequest::new("GET", "http://rgw/admin/user"))
            .await
            .unwrap();
        assert_eq!(second.status, 404);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_default_response() {
        let transport = MockTransport::with_default(MockResponse::json("[]"));

        for _ in 0..3 {
            let response = transport
                .send(HttpRequest::new("GET", "http://rgw/admin/bucket"))
                .await
                .unwrap();
            assert_eq!(response.content_type(), Some("application/json"));
        }
    }

    #[tokio::test]
    async fn test_mock_transport_queued_failure() {
        let transport = MockTransport::new();
        transport.queue_failure(TransportError::Connect {
            message: "refused".to_string(),
        });

        let err = transport
            .send(HttpRequest::new("GET", "http://rgw/admin/user"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }));
    }

    #[tokio::test]
    async fn test_mock_transport_empty_queue_fails() {
        let transport = MockTransport::new();
        let result = transport
            .send(HttpRequest::new("GET", "http://rgw/admin/user"))
            .await;
        assert!(result.is_err());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::with_default(MockResponse::ok());

        let request = HttpRequest::new("PUT", "http://rgw/admin/user?uid=a")
            .with_body(Bytes::from("{}"));
        transport.send(request).await.unwrap();

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.method, "PUT");
        assert_eq!(recorded.url, "http://rgw/admin/user?uid=a");
        assert_eq!(recorded.body, Some(Bytes::from("{}")));
    }
}
