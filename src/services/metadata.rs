//! Metadata service.

use crate::client::Dispatcher;
use crate::decode::JsonDecoder;
use crate::encoding::RequestSpec;
use crate::error::AdminError;
use crate::types::*;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const USER_SECTION: &str = "metadata/user";
const BUCKET_SECTION: &str = "metadata/bucket";
const BUCKET_INSTANCE_SECTION: &str = "metadata/bucket.instance";

/// Service for raw metadata.
pub struct MetadataService {
    dispatcher: Arc<Dispatcher>,
}

impl MetadataService {
    /// Create a new metadata service.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// List user metadata keys.
    pub async fn list_users(&self) -> Result<Vec<String>, AdminError> {
        self.list(USER_SECTION).await
    }

    /// Fetch the metadata entry of a user.
    pub async fn get_user(&self, uid: impl Into<String>) -> Result<MUserResponse, AdminError> {
        self.get(USER_SECTION, uid.into()).await
    }

    /// List bucket metadata keys.
    pub async fn list_buckets(&self) -> Result<Vec<String>, AdminError> {
        self.list(BUCKET_SECTION).await
    }

    /// Fetch the metadata entry of a bucket.
    pub async fn get_bucket(&self, bucket: impl Into<String>) -> Result<MBucketResponse, AdminError> {
        self.get(BUCKET_SECTION, bucket.into()).await
    }

    /// List bucket instance keys, each `bucket:instance-id`.
    pub async fn list_bucket_instances(&self) -> Result<Vec<String>, AdminError> {
        self.list(BUCKET_INSTANCE_SECTION).await
    }

    /// Fetch a bucket instance by its `bucket:instance-id` key.
    pub async fn get_bucket_instance(
        &self,
        key: impl Into<String>,
    ) -> Result<MBucketInstanceResponse, AdminError> {
        self.get(BUCKET_INSTANCE_SECTION, key.into()).await
    }

    async fn list(&self, section: &str) -> Result<Vec<String>, AdminError> {
        self.dispatcher
            .call(RequestSpec::get(section), JsonDecoder::new())
            .await
    }

    async fn get<T: DeserializeOwned>(&self, section: &str, key: String) -> Result<T, AdminError> {
        let request = MetadataRequest { key };
        self.dispatcher
            .call(RequestSpec::get(section).query(&request), JsonDecoder::new())
            .await
    }
}
