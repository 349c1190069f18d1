//! Keys service.

use crate::client::Dispatcher;
use crate::decode::{Discard, JsonDecoder};
use crate::encoding::RequestSpec;
use crate::error::AdminError;
use crate::types::*;
use std::sync::Arc;

/// Service for access key operations.
pub struct KeysService {
    dispatcher: Arc<Dispatcher>,
}

impl KeysService {
    /// Create a new keys service.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Create a key. Returns every S3 key the user now holds.
    pub async fn create(&self, request: KeyCreateRequest) -> Result<Vec<UserKey>, AdminError> {
        self.dispatcher
            .call(RequestSpec::put("user?key").query(&request), JsonDecoder::new())
            .await
    }

    /// Remove a key.
    pub async fn remove(&self, request: KeyRemoveRequest) -> Result<(), AdminError> {
        self.dispatcher
            .call(RequestSpec::delete("user?key").query(&request), Discard)
            .await
    }
}
