//! Buckets service.

use crate::client::Dispatcher;
use crate::decode::{BucketIndexDecoder, Discard, JsonDecoder};
use crate::encoding::RequestSpec;
use crate::error::AdminError;
use crate::types::*;
use std::sync::Arc;

/// Service for bucket operations.
pub struct BucketsService {
    dispatcher: Arc<Dispatcher>,
}

impl BucketsService {
    /// Create a new buckets service.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// List bucket names, optionally limited to one user or one bucket.
    pub async fn list(
        &self,
        uid: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Vec<String>, AdminError> {
        let request = BucketRequest {
            bucket: bucket.into(),
            uid: uid.into(),
            stats: false,
        };
        self.dispatcher
            .call(RequestSpec::get("bucket").query(&request), JsonDecoder::new())
            .await
    }

    /// Fetch bucket statistics, optionally limited to one user or one bucket.
    pub async fn stats(
        &self,
        uid: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Vec<BucketStatsResponse>, AdminError> {
        let request = BucketRequest {
            bucket: bucket.into(),
            uid: uid.into(),
            stats: true,
        };
        self.dispatcher
            .call(RequestSpec::get("bucket").query(&request), JsonDecoder::new())
            .await
    }

    /// Check, and with `fix` repair, a bucket index.
    pub async fn index(&self, request: BucketIndexRequest) -> Result<BucketIndexResponse, AdminError> {
        self.dispatcher
            .call(RequestSpec::get("bucket?index").query(&request), BucketIndexDecoder)
            .await
    }

    /// Remove a bucket.
    pub async fn remove(&self, bucket: impl Into<String>, purge_objects: bool) -> Result<(), AdminError> {
        let request = BucketRemoveRequest {
            bucket: bucket.into(),
            purge_objects,
        };
        self.dispatcher
            .call(RequestSpec::delete("bucket").query(&request), Discard)
            .await
    }

    /// Link a bucket to a user, unlinking it from its previous owner.
    pub async fn link(&self, request: BucketLinkRequest) -> Result<(), AdminError> {
        self.dispatcher
            .call(RequestSpec::put("bucket").query(&request), Discard)
            .await
    }

    /// Unlink a bucket from a user.
    pub async fn unlink(&self, bucket: impl Into<String>, uid: impl Into<String>) -> Result<(), AdminError> {
        let request = BucketLinkRequest::new(bucket, uid);
        self.dispatcher
            .call(RequestSpec::post("bucket").query(&request), Discard)
            .await
    }

    /// Remove one object from a bucket.
    pub async fn remove_object(
        &self,
        bucket: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<(), AdminError> {
        let request = BucketObjectRequest::new(bucket, object);
        self.dispatcher
            .call(RequestSpec::delete("bucket?object").query(&request), Discard)
            .await
    }

    /// Fetch the policy of a bucket, or of one of its objects when `object`
    /// is non-empty.
    pub async fn policy(
        &self,
        bucket: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<BucketPolicyResponse, AdminError> {
        let request = BucketObjectRequest::new(bucket, object);
        self.dispatcher
            .call(RequestSpec::get("bucket?policy").query(&request), JsonDecoder::new())
            .await
    }
}
