//! HTTP transport layer for admin API requests.
//!
//! This module provides the HTTP transport abstraction the dispatcher sends
//! signed requests through. The default implementation wraps a pooled
//! `reqwest::Client` that is built once per admin client and shared by every
//! call; it handles connection pooling, timeouts, and TLS trust settings.

use crate::config::AdminConfig;
use crate::error::{ConfigurationError, TransportError};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::collections::HashMap;
use std::io::BufReader;
use std::time::Duration;

/// HTTP request to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Bytes>,
    /// Whether a 200 response body should be read. Error bodies are always
    /// read, best-effort.
    pub read_body: bool,
}

impl HttpRequest {
    /// Create a new HTTP request.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            read_body: true,
        }
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The query string of the URL, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, q)| q)
    }
}

/// HTTP response received.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The canonical reason phrase for the status, e.g. `Not Found`.
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get the gateway request ID from response headers.
    pub fn request_id(&self) -> Option<&str> {
        self.get_header("x-amz-request-id")
    }

    /// Get the content type.
    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
    }
}

/// HTTP transport trait for making requests.
///
/// Implementations must be safe to share between concurrent calls; the
/// pipeline keeps no per-call state in the transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and return the response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default HTTP transport using reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Build the transport described by a client configuration.
    ///
    /// The in-memory CA bundle wins over the bundle path when both are set.
    pub fn from_config(config: &AdminConfig) -> Result<Self, ConfigurationError> {
        let mut builder = Self::builder()
            .connect_timeout(config.connect_timeout)
            .request_timeout(config.client_timeout)
            .keep_alive(config.keep_alive)
            .pool_max_idle_per_host(config.max_idle_connections)
            .pool_idle_timeout(Some(config.idle_timeout))
            .insecure_skip_verify(config.insecure_skip_verify)
            .user_agent(config.user_agent.clone());

        if let Some(pem) = &config.ca_cert_bundle {
            builder = builder.ca_bundle(pem.clone());
        } else if let Some(path) = &config.ca_cert_bundle_path {
            let pem = std::fs::read(path).map_err(|e| ConfigurationError::CaBundleUnreadable {
                path: path.display().to_string(),
                source: e,
            })?;
            builder = builder.ca_bundle(pem);
        }

        builder.build()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request
            .method
            .parse::<reqwest::Method>()
            .map_err(|e| TransportError::Connect {
                message: format!("Invalid HTTP method: {}", e),
            })?;

        let mut req_builder = self.client.request(method, &request.url);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = if status != 200 {
            read_best_effort(response).await
        } else if request.read_body {
            response.bytes().await?
        } else {
            Bytes::new()
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Collect whatever arrives of an error body. A connection that fails
/// mid-body keeps the chunks already received.
async fn read_best_effort(mut response: reqwest::Response) -> Bytes {
    let mut body = BytesMut::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        body.extend_from_slice(&chunk);
    }
    body.freeze()
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

/// Builder for reqwest transport.
pub struct ReqwestTransportBuilder {
    connect_timeout: Duration,
    request_timeout: Duration,
    keep_alive: Duration,
    pool_max_idle_per_host: usize,
    pool_idle_timeout: Option<Duration>,
    insecure_skip_verify: bool,
    ca_bundle: Option<Vec<u8>>,
    user_agent: String,
}

impl ReqwestTransportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            keep_alive: Duration::from_secs(30),
            pool_max_idle_per_host: 100,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            insecure_skip_verify: false,
            ca_bundle: None,
            user_agent: format!("radosgw-admin/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the overall request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the TCP keep-alive interval.
    pub fn keep_alive(mut self, interval: Duration) -> Self {
        self.keep_alive = interval;
        self
    }

    /// Set the maximum idle connections per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the idle connection timeout.
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Accept any server certificate.
    pub fn insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Trust the certificates in this PEM bundle in addition to the built-in
    /// roots.
    pub fn ca_bundle(mut self, pem: Vec<u8>) -> Self {
        self.ca_bundle = Some(pem);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<ReqwestTransport, ConfigurationError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .tcp_keepalive(Some(self.keep_alive))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout)
            .danger_accept_invalid_certs(self.insecure_skip_verify)
            .user_agent(&self.user_agent);

        if let Some(pem) = &self.ca_bundle {
            for cert in parse_pem_bundle(pem)? {
                builder = builder.add_root_certificate(cert);
            }
        }

        let client = builder
            .build()
            .map_err(|e| ConfigurationError::TransportBuild {
                message: e.to_string(),
            })?;

        Ok(ReqwestTransport { client })
    }
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse every certificate in a PEM bundle. A bundle with no certificates is
/// an error.
pub fn parse_pem_bundle(pem: &[u8]) -> Result<Vec<reqwest::Certificate>, ConfigurationError> {
    let mut reader = BufReader::new(pem);
    let mut certs = Vec::new();

    for der in rustls_pemfile::certs(&mut reader) {
        let der = der.map_err(|e| ConfigurationError::InvalidCaBundle {
            message: e.to_string(),
        })?;
        let cert = reqwest::Certificate::from_der(der.as_ref()).map_err(|e| {
            ConfigurationError::InvalidCaBundle {
                message: e.to_string(),
            }
        })?;
        certs.push(cert);
    }

    if certs.is_empty() {
        return Err(ConfigurationError::InvalidCaBundle {
            message: "no PEM certificates found".to_string(),
        });
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::new("GET", "https://example.com/admin/user?uid=a")
            .with_header("Content-Type", "application/json")
            .with_body(b"test body".to_vec());

        assert_eq!(request.method, "GET");
        assert_eq!(request.get_header("content-type"), Some("application/json"));
        assert_eq!(request.query(), Some("uid=a"));
        assert!(request.body.is_some());
    }

    #[test]
    fn test_status_text() {
        let response = HttpResponse {
            status: 404,
            headers: HashMap::new(),
            body: Bytes::new(),
        };
        assert!(!response.is_success());
        assert_eq!(response.status_text(), "Not Found");
    }

    #[test]
    fn test_response_headers_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("x-amz-request-id".to_string(), "tx0001".to_string());

        let response = HttpResponse {
            status: 200,
            headers,
            body: Bytes::new(),
        };

        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.get_header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.request_id(), Some("tx0001"));
    }

    #[test]
    fn test_transport_builder() {
        let transport = ReqwestTransport::builder()
            .connect_timeout(Duration::from_secs(10))
            .request_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(50)
            .build();

        assert!(transport.is_ok());
    }

    #[test]
    fn test_invalid_pem_bundle() {
        let result = parse_pem_bundle(b"this is not a certificate");
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidCaBundle { .. })
        ));
    }

    #[test]
    fn test_unreadable_bundle_path() {
        let config = AdminConfig::builder()
            .server_url("https://rgw.example.org")
            .credentials("a", "b")
            .ca_cert_bundle_path("/definitely/not/here.pem")
            .build()
            .unwrap();

        match ReqwestTransport::from_config(&config) {
            Err(ConfigurationError::CaBundleUnreadable { path, .. }) => {
                assert_eq!(path, "/definitely/not/here.pem");
            }
            other => panic!("expected CaBundleUnreadable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bytes_take_precedence_over_path() {
        let config = AdminConfig::builder()
            .server_url("https://rgw.example.org")
            .credentials("a", "b")
            .ca_cert_bundle(b"garbage".to_vec())
            .ca_cert_bundle_path("/definitely/not/here.pem")
            .build()
            .unwrap();

        assert!(matches!(
            ReqwestTransport::from_config(&config),
            Err(ConfigurationError::InvalidCaBundle { .. })
        ));
    }
}
