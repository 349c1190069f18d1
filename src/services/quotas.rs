//! Quotas service.

use crate::client::Dispatcher;
use crate::decode::{Discard, JsonDecoder};
use crate::encoding::RequestSpec;
use crate::error::AdminError;
use crate::types::*;
use std::sync::Arc;

/// Service for user and bucket quota operations.
pub struct QuotasService {
    dispatcher: Arc<Dispatcher>,
}

impl QuotasService {
    /// Create a new quotas service.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Fetch both the user and the per-bucket quota of a user.
    pub async fn get(&self, uid: impl Into<String>) -> Result<Quotas, AdminError> {
        let request = QuotaGetRequest {
            uid: uid.into(),
            quota_type: String::new(),
        };
        self.dispatcher
            .call(RequestSpec::get("user?quota").query(&request), JsonDecoder::new())
            .await
    }

    /// Fetch the per-bucket quota applied to a user's buckets.
    pub async fn bucket(&self, uid: impl Into<String>) -> Result<QuotaMeta, AdminError> {
        self.typed(uid.into(), "bucket").await
    }

    /// Fetch the user-wide quota.
    pub async fn user(&self, uid: impl Into<String>) -> Result<QuotaMeta, AdminError> {
        self.typed(uid.into(), "user").await
    }

    /// Set a user or bucket quota.
    pub async fn set(&self, request: QuotaSetRequest) -> Result<(), AdminError> {
        self.dispatcher
            .call(RequestSpec::put("user?quota").query(&request), Discard)
            .await
    }

    async fn typed(&self, uid: String, quota_type: &str) -> Result<QuotaMeta, AdminError> {
        let request = QuotaGetRequest {
            uid,
            quota_type: quota_type.to_string(),
        };
        self.dispatcher
            .call(RequestSpec::get("user?quota").query(&request), JsonDecoder::new())
            .await
    }
}
