//! Mock signer for testing.

use crate::credentials::Credentials;
use crate::error::EncodeError;
use crate::signing::RequestSigner;
use crate::transport::HttpRequest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Fixed authorization value set by [`MockSigner`].
pub const MOCK_AUTHORIZATION: &str = "AWS mock:signature";

/// Signer that stamps a fixed `Authorization` header and records the access
/// key it was handed.
pub struct MockSigner {
    sign_count: AtomicUsize,
    access_keys: Mutex<Vec<String>>,
    fail: bool,
}

impl MockSigner {
    /// Create a new mock signer.
    pub fn new() -> Self {
        Self {
            sign_count: AtomicUsize::new(0),
            access_keys: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Create a signer that rejects every request.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Get the number of sign calls.
    pub fn sign_count(&self) -> usize {
        self.sign_count.load(Ordering::Relaxed)
    }

    /// Access key IDs seen, in call order.
    pub fn access_keys(&self) -> Vec<String> {
        self.access_keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner for MockSigner {
    fn sign(
        &self,
        mut request: HttpRequest,
        credentials: &Credentials,
    ) -> Result<HttpRequest, EncodeError> {
        self.sign_count.fetch_add(1, Ordering::Relaxed);
        self.access_keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(credentials.access_key_id().to_string());

        if self.fail {
            return Err(EncodeError::InvalidUrl {
                url: request.url,
                details: "mock signer failure".to_string(),
            });
        }

        request
            .headers
            .insert("Authorization".to_string(), MOCK_AUTHORIZATION.to_string());
        Ok(request)
    }
}

impl std::fmt::Debug for MockSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSigner")
            .field("sign_count", &self.sign_count())
            .field("fail", &self.fail)
            .finish()
    }
}
