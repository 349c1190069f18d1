//! Response types for admin operations.

use super::common::UserCap;
use crate::time::RadosTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---- users ----

/// User record returned by user and metadata calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfoResponse {
    /// User ID.
    pub user_id: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Non-zero when suspended.
    pub suspended: i64,
    /// Bucket limit.
    pub max_buckets: i64,
    /// Subusers.
    pub subusers: Vec<SubUser>,
    /// S3 keys.
    pub keys: Vec<UserKey>,
    /// Swift keys.
    pub swift_keys: Vec<SwiftKey>,
    /// Capabilities.
    pub caps: Vec<UserCap>,
}

impl UserInfoResponse {
    /// True if the user is suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspended != 0
    }
}

/// A subuser and its permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubUser {
    /// Subuser ID, `uid:name`.
    pub id: String,
    /// Permission text, e.g. `full-control`.
    pub permissions: String,
}

/// An S3 key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserKey {
    /// Owning user or subuser.
    pub user: String,
    /// Access key.
    pub access_key: String,
    /// Secret key.
    pub secret_key: String,
}

/// A Swift key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwiftKey {
    /// Owning subuser.
    pub user: String,
    /// Secret key.
    pub secret_key: String,
}

// ---- quotas ----

/// One quota setting. Negative limits mean unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaMeta {
    /// Whether the quota is enforced.
    pub enabled: bool,
    /// Size limit in KiB.
    pub max_size_kb: i64,
    /// Object limit.
    pub max_objects: i64,
}

/// Both quotas of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotas {
    /// Per-bucket quota.
    pub bucket_quota: QuotaMeta,
    /// Per-user quota.
    pub user_quota: QuotaMeta,
}

// ---- buckets ----

/// Usage counters for one storage category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketUsageEntry {
    /// Logical size in KiB.
    pub size_kb: i64,
    /// Allocated size in KiB.
    pub size_kb_actual: i64,
    /// Object count.
    pub num_objects: i64,
}

/// Usage by storage category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketUsageCategories {
    /// `rgw.none`.
    #[serde(rename = "rgw.none", skip_serializing_if = "Option::is_none")]
    pub rgw_none: Option<BucketUsageEntry>,
    /// `rgw.main`.
    #[serde(rename = "rgw.main", skip_serializing_if = "Option::is_none")]
    pub rgw_main: Option<BucketUsageEntry>,
    /// `rgw.shadow`.
    #[serde(rename = "rgw.shadow", skip_serializing_if = "Option::is_none")]
    pub rgw_shadow: Option<BucketUsageEntry>,
    /// `rgw.multimeta`.
    #[serde(rename = "rgw.multimeta", skip_serializing_if = "Option::is_none")]
    pub rgw_multimeta: Option<BucketUsageEntry>,
}

/// Usage summary header of a bucket index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketUsage {
    /// Counters by category.
    pub usage: BucketUsageCategories,
}

/// Usage headers of a bucket index check, as stored and as recalculated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketIndexHeaders {
    /// Header as stored in the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_header: Option<BucketUsage>,
    /// Header recalculated from the objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_header: Option<BucketUsage>,
}

/// Result of `GET /bucket?index`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketIndexResponse {
    /// Objects found that the index did not account for.
    pub new_objects: Vec<String>,
    /// Usage headers. Left at their defaults when the gateway sent none.
    pub headers: BucketIndexHeaders,
}

/// Bucket quota as reported in bucket stats and metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketQuota {
    /// Whether the quota is enforced.
    pub enabled: bool,
    /// Size limit in KiB.
    pub max_size_kb: i64,
    /// Object limit.
    pub max_objects: i64,
}

/// Statistics for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStatsResponse {
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Data pool.
    #[serde(default)]
    pub pool: String,
    /// Index pool.
    #[serde(default)]
    pub index_pool: String,
    /// Bucket instance ID.
    #[serde(default)]
    pub id: String,
    /// Marker.
    #[serde(default)]
    pub marker: String,
    /// Owning user.
    #[serde(default)]
    pub owner: String,
    /// Index version.
    #[serde(default)]
    pub ver: String,
    /// Master version.
    #[serde(default)]
    pub master_ver: String,
    /// Last modification time.
    pub mtime: RadosTime,
    /// Maximum marker.
    #[serde(default)]
    pub max_marker: String,
    /// Usage by category name.
    #[serde(default)]
    pub usage: HashMap<String, BucketUsageEntry>,
    /// Bucket quota.
    #[serde(default)]
    pub bucket_quota: Option<BucketQuota>,
}

/// Owner of a bucket or object ACL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOwner {
    /// User ID.
    pub id: String,
    /// Display name.
    pub display_name: String,
}

/// Result of `GET /bucket?policy`. The ACL maps are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketPolicyResponse {
    /// ACL document.
    pub acl: serde_json::Value,
    /// Owner.
    pub owner: PolicyOwner,
}

// ---- usage ----

/// Usage report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageResponse {
    /// Per-user entries.
    pub entries: Vec<UsageEntry>,
    /// Per-user summaries.
    pub summary: Vec<UsageSummary>,
}

/// Usage of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageEntry {
    /// Buckets used.
    pub buckets: Vec<UsageBucket>,
    /// User ID.
    pub user: String,
}

/// Usage of one bucket during one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBucket {
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Owning user.
    #[serde(default)]
    pub owner: String,
    /// Counters by operation category.
    #[serde(default)]
    pub categories: Vec<UsageCategory>,
    /// Start of the hour, in seconds since the epoch.
    #[serde(default)]
    pub epoch: i64,
    /// Start of the hour.
    pub time: RadosTime,
}

/// Counters for one operation category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageCategory {
    /// Bytes sent.
    pub bytes_sent: i64,
    /// Bytes received.
    pub bytes_received: i64,
    /// Operations.
    pub ops: i64,
    /// Successful operations.
    pub successful_ops: i64,
    /// Category, e.g. `get_obj`.
    pub category: String,
}

/// Totals over all categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageTotal {
    /// Bytes sent.
    pub bytes_sent: i64,
    /// Bytes received.
    pub bytes_received: i64,
    /// Operations.
    pub ops: i64,
    /// Successful operations.
    pub successful_ops: i64,
}

/// Usage summary of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageSummary {
    /// User ID.
    pub user: String,
    /// Counters by category.
    pub categories: Vec<UsageCategory>,
    /// Totals.
    pub total: Option<UsageTotal>,
}

// ---- metadata ----

/// Version stamp of a metadata entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaVersion {
    /// Version tag.
    pub tag: String,
    /// Version number.
    pub ver: i64,
}

/// Common envelope of metadata responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaResponse<T> {
    /// Metadata key.
    #[serde(default)]
    pub key: String,
    /// Last modification time.
    pub mtime: RadosTime,
    /// Version stamp.
    #[serde(default)]
    pub ver: MetaVersion,
    /// Entry payload.
    pub data: T,
}

/// `GET /metadata/user?key=..`.
pub type MUserResponse = MetaResponse<UserInfoResponse>;

/// `GET /metadata/bucket?key=..`.
pub type MBucketResponse = MetaResponse<MBucketData>;

/// `GET /metadata/bucket.instance?key=..`.
pub type MBucketInstanceResponse = MetaResponse<MBucketInstanceData>;

/// Bucket identity as stored in metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MBucket {
    /// Marker.
    pub marker: String,
    /// Bucket name.
    pub name: String,
    /// Extra data pool.
    pub data_extra_pool: String,
    /// Bucket instance ID.
    pub bucket_id: String,
    /// Data pool.
    pub pool: String,
    /// Index pool.
    pub index_pool: String,
    /// Tenant.
    pub tenant: String,
}

/// Payload of a bucket metadata entry.
///
/// Several fields are booleans and numbers the gateway writes as strings;
/// they are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MBucketData {
    /// Bucket identity.
    pub bucket: MBucket,
    /// Whether instance info exists.
    pub has_bucket_info: String,
    /// Whether the bucket is linked to its owner.
    pub linked: String,
    /// Creation time, seconds since the epoch.
    pub creation_time: String,
    /// Owning user.
    pub owner: String,
}

/// Bucket instance details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MBucketInfo {
    /// Bucket identity.
    pub bucket: MBucket,
    /// Index shard count.
    pub num_shards: i64,
    /// Placement rule.
    pub placement_rule: String,
    /// Swift versioning location.
    pub swift_ver_location: String,
    /// Flags.
    pub flags: i64,
    /// Whether website config exists.
    pub has_website: String,
    /// Bucket quota.
    pub quota: BucketQuota,
    /// Swift versioning.
    pub swift_versioning: String,
    /// Owning user.
    pub owner: String,
    /// Requester pays.
    pub requester_pays: String,
    /// Index type.
    pub index_type: i64,
    /// Index shard hash type.
    pub bi_shard_hash_type: i64,
    /// Whether an instance object exists.
    #[serde(rename = "has_instance_obj")]
    pub has_instance_object: String,
    /// Creation time.
    pub creation_time: String,
    /// Zone group.
    #[serde(rename = "zonegroup")]
    pub zone_group: String,
}

/// Extended attribute of a bucket instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attr {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub val: String,
}

/// Payload of a bucket instance metadata entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MBucketInstanceData {
    /// Instance details.
    pub bucket_info: MBucketInfo,
    /// Extended attributes.
    pub attrs: Vec<Attr>,
}
