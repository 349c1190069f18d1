//! Parsing of the gateway's JSON error bodies.

use serde::Deserialize;

/// Error document returned by the gateway alongside non-200 statuses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RgwErrorBody {
    /// Error code (e.g. `NoSuchUser`, `InvalidAccessKeyId`).
    #[serde(rename = "Code")]
    pub code: String,
    /// Request ID assigned by the gateway.
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
    /// Host that served the request.
    #[serde(rename = "HostId", default)]
    pub host_id: Option<String>,
}

/// Parse an error body, returning `None` when it is not the expected JSON.
pub fn parse_error_body(body: &str) -> Option<RgwErrorBody> {
    serde_json::from_str(body.trim()).ok()
}
