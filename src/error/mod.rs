//! Error types for the admin API client.
//!
//! Errors are grouped by the pipeline stage that produced them so callers can
//! tell a request that never left the process (configuration, validation,
//! encoding) from one the gateway rejected (upstream status) or one whose
//! answer could not be understood (decode).

mod upstream;

pub use upstream::{parse_error_body, RgwErrorBody};

use crate::validation::FieldViolation;
use std::time::Duration;
use thiserror::Error;

/// Top-level error type for admin API calls.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Client construction failed.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An outbound request struct failed its declared rules. Nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// DNS, connect, TLS, timeout or cancellation failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The gateway answered with something other than HTTP 200.
    #[error("Invalid status code {status} : {status_text} : body: {body}")]
    UpstreamStatus {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Response body, read best-effort.
        body: String,
    },

    /// A 200 response whose body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl AdminError {
    /// Returns the HTTP status code for upstream failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdminError::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the gateway answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns the gateway's error code (e.g. `NoSuchUser`) if the error body
    /// carried one.
    pub fn upstream_code(&self) -> Option<String> {
        match self {
            AdminError::UpstreamStatus { body, .. } => parse_error_body(body).map(|b| b.code),
            _ => None,
        }
    }

    /// True when the request was never sent because validation failed.
    pub fn is_validation(&self) -> bool {
        matches!(self, AdminError::Validation(_))
    }

    /// True when the call was aborted by the caller's cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AdminError::Transport(TransportError::Cancelled))
    }
}

/// Configuration and client construction errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The server URL or admin path did not form a valid URL.
    #[error("Invalid endpoint URL '{url}': {details}")]
    InvalidEndpoint {
        /// The rejected URL.
        url: String,
        /// Parser diagnostics.
        details: String,
    },

    /// The CA bundle path could not be read.
    #[error("Cannot open ca cert bundle {path}: {source}")]
    CaBundleUnreadable {
        /// Path that was configured.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The CA bundle was not valid PEM or held no certificates.
    #[error("Invalid cert bundle: {message}")]
    InvalidCaBundle {
        /// What was wrong with the bundle.
        message: String,
    },

    /// The zone name could not be resolved.
    #[error("Invalid time zone '{zone}': expected Local, UTC or an offset like +02:00")]
    InvalidTimeZone {
        /// The rejected zone name.
        zone: String,
    },

    /// A required setting was not supplied.
    #[error("Missing configuration: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// A setting had an unusable value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("Cannot load configuration: {message}")]
    Load {
        /// Parser or I/O diagnostics.
        message: String,
    },

    /// The HTTP stack refused the transport settings.
    #[error("Cannot build HTTP transport: {message}")]
    TransportBuild {
        /// Diagnostics from the HTTP stack.
        message: String,
    },
}

/// Validation failure for an outbound request struct.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Human-readable messages, one per violated rule.
    #[error("Validation error: {}", .0.join(" ; "))]
    Fields(Vec<String>),

    /// The untranslated violation list, returned when the client was
    /// configured with `raw_validator_errors`.
    #[error("{}", format_raw(.0))]
    Raw(Vec<FieldViolation>),
}

impl ValidationError {
    /// Number of violated rules.
    pub fn len(&self) -> usize {
        match self {
            ValidationError::Fields(messages) => messages.len(),
            ValidationError::Raw(violations) => violations.len(),
        }
    }

    /// True if no rule was reported. Never the case for errors produced by
    /// the validator.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn format_raw(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failures while turning a request struct into HTTP.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The JSON body could not be serialized.
    #[error("cannot serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    /// Query parameters could not be form-encoded.
    #[error("cannot encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// A timestamp fell outside the representable range.
    #[error("RadosTime year {year} outside of range [0,9999]")]
    TimeOutOfRange {
        /// The offending year.
        year: i32,
    },

    /// The joined request URL was not valid.
    #[error("invalid request URL '{url}': {details}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser diagnostics.
        details: String,
    },
}

/// Network-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error from the HTTP stack, passed through unchanged.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Connection could not be established.
    #[error("connection failed: {message}")]
    Connect {
        /// Diagnostics.
        message: String,
    },

    /// The per-call deadline elapsed.
    #[error("request timed out after {duration:?}")]
    Timeout {
        /// The deadline that elapsed.
        duration: Duration,
    },

    /// The caller's cancellation signal fired before the call completed.
    #[error("request cancelled")]
    Cancelled,
}

impl TransportError {
    /// True for deadline expiry, whether enforced locally or by the HTTP stack.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Timeout { .. } => true,
            TransportError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Failures decoding a successful response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not the JSON shape expected.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// A response that must carry a document was empty.
    #[error("empty response body")]
    EmptyBody,

    /// A timestamp did not match any accepted layout.
    #[error("invalid RadosTime '{value}': {message}")]
    InvalidTime {
        /// The rejected text.
        value: String,
        /// Parser diagnostics.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message() {
        let err = AdminError::UpstreamStatus {
            status: 404,
            status_text: "Not Found".to_string(),
            body: r#"{"Code":"NoSuchUser"}"#.to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("Not Found"));
        assert!(message.contains(r#"{"Code":"NoSuchUser"}"#));
        assert!(err.is_not_found());
        assert_eq!(err.upstream_code().as_deref(), Some("NoSuchUser"));
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let err = AdminError::from(ValidationError::Fields(vec![
            "Required field uid is missing or empty".to_string(),
            "Required field display_name is missing or empty".to_string(),
        ]));
        assert_eq!(
            err.to_string(),
            "Validation error: Required field uid is missing or empty ; \
             Required field display_name is missing or empty"
        );
        assert!(err.is_validation());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_transport_timeout_detection() {
        let err = TransportError::Timeout {
            duration: Duration::from_secs(3),
        };
        assert!(err.is_timeout());
        assert!(!TransportError::Cancelled.is_timeout());
        assert!(AdminError::from(TransportError::Cancelled).is_cancelled());
    }

    #[test]
    fn test_ca_bundle_error_names_path() {
        let err = ConfigurationError::CaBundleUnreadable {
            path: "/nope/ca.pem".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope/ca.pem"));
    }
}
