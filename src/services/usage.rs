//! Usage service.

use crate::client::Dispatcher;
use crate::decode::{Discard, JsonDecoder};
use crate::encoding::RequestSpec;
use crate::error::AdminError;
use crate::types::*;
use std::sync::Arc;

/// Service for the usage log.
pub struct UsageService {
    dispatcher: Arc<Dispatcher>,
}

impl UsageService {
    /// Create a new usage service.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Query usage. Timestamps in the response are interpreted in the
    /// client's zone when they carry no offset.
    pub async fn get(&self, request: UsageRequest) -> Result<UsageResponse, AdminError> {
        self.dispatcher
            .call(RequestSpec::get("usage").query(&request), JsonDecoder::new())
            .await
    }

    /// Trim the usage log.
    pub async fn trim(&self, request: TrimUsageRequest) -> Result<(), AdminError> {
        self.dispatcher
            .call(RequestSpec::delete("usage").query(&request), Discard)
            .await
    }
}
