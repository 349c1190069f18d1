//! Request types for admin operations.
//!
//! Each request describes its query parameters through [`Schema`]; the
//! field table is what gets validated and encoded.

use super::common::*;
use crate::time::RadosTime;
use crate::validation::{Field, FieldSpec, FieldValue, Rule, Schema};

const REQUIRED: &[Rule] = &[Rule::Required];
const KEY_TYPE_RULES: &[Rule] = &[Rule::OmitEmpty, Rule::OneOf(KEY_TYPES)];
const CAPS_RULES: &[Rule] = &[Rule::OmitEmpty, Rule::Dive];

const UID: FieldSpec = FieldSpec::new("uid", "uid").rules(REQUIRED).always();
const UID_OPTIONAL: FieldSpec = FieldSpec::new("uid", "uid");
const SUBUSER: FieldSpec = FieldSpec::new("subuser", "subuser").rules(REQUIRED).always();
const SUBUSER_OPTIONAL: FieldSpec = FieldSpec::new("subuser", "subuser");
const EMAIL: FieldSpec = FieldSpec::new("email", "email");
const KEY_TYPE: FieldSpec = FieldSpec::new("key_type", "key-type").rules(KEY_TYPE_RULES);
const ACCESS_KEY: FieldSpec = FieldSpec::new("access_key", "access-key");
const SECRET_KEY: FieldSpec = FieldSpec::new("secret_key", "secret-key");
const USER_CAPS: FieldSpec = FieldSpec::new("user_caps", "user-caps").rules(CAPS_RULES);
const GENERATE_KEY: FieldSpec = FieldSpec::new("generate_key", "generate-key");
const MAX_BUCKETS: FieldSpec = FieldSpec::new("max_buckets", "max-buckets");
const SUSPENDED: FieldSpec = FieldSpec::new("suspended", "suspended");
const BUCKET: FieldSpec = FieldSpec::new("bucket", "bucket").rules(REQUIRED).always();
const BUCKET_OPTIONAL: FieldSpec = FieldSpec::new("bucket", "bucket");
const START: FieldSpec = FieldSpec::new("start", "start");
const END: FieldSpec = FieldSpec::new("end", "end");

// ---- users ----

/// Query for `GET /user`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfoRequest {
    /// User ID.
    pub uid: String,
}

impl UserInfoRequest {
    /// Create a request for `uid`.
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

impl Schema for UserInfoRequest {
    fn type_name(&self) -> &'static str {
        "UserInfoRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(&UID, FieldValue::Str(&self.uid))]
    }
}

/// Query for `PUT /user`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCreateRequest {
    /// User ID.
    pub uid: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Key type, `s3` or `swift`.
    pub key_type: String,
    /// Access key to assign.
    pub access_key: String,
    /// Secret key to assign.
    pub secret_key: String,
    /// Initial capabilities.
    pub user_caps: Vec<UserCap>,
    /// Generate a key pair. The gateway generates one when unset.
    pub generate_key: TriBool,
    /// Bucket limit.
    pub max_buckets: i64,
    /// Create the user suspended.
    pub suspended: bool,
}

impl UserCreateRequest {
    /// Create a request with the required fields.
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the key type.
    pub fn with_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = key_type.into();
        self
    }

    /// Add a capability.
    pub fn with_cap(mut self, cap: UserCap) -> Self {
        self.user_caps.push(cap);
        self
    }

    /// Choose whether a key pair is generated.
    pub fn with_generate_key(mut self, generate: bool) -> Self {
        self.generate_key = generate.into();
        self
    }

    /// Set the bucket limit.
    pub fn with_max_buckets(mut self, max: i64) -> Self {
        self.max_buckets = max;
        self
    }
}

impl Schema for UserCreateRequest {
    fn type_name(&self) -> &'static str {
        "UserCreateRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const DISPLAY_NAME: FieldSpec = FieldSpec::new("display_name", "display-name")
            .rules(REQUIRED)
            .always();
        const EMAIL_CHECKED: FieldSpec =
            FieldSpec::new("email", "email").rules(&[Rule::OmitEmpty, Rule::Email]);

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&DISPLAY_NAME, FieldValue::Str(&self.display_name)),
            Field::new(&EMAIL_CHECKED, FieldValue::Str(&self.email)),
            Field::new(&KEY_TYPE, FieldValue::Str(&self.key_type)),
            Field::new(&ACCESS_KEY, FieldValue::Str(&self.access_key)),
            Field::new(&SECRET_KEY, FieldValue::Str(&self.secret_key)),
            Field::new(&USER_CAPS, FieldValue::Caps(&self.user_caps)),
            Field::new(&GENERATE_KEY, FieldValue::Tri(self.generate_key)),
            Field::new(&MAX_BUCKETS, FieldValue::Int(self.max_buckets)),
            Field::new(&SUSPENDED, FieldValue::Bool(self.suspended)),
        ]
    }
}

/// Query for `POST /user`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserModifyRequest {
    /// User ID.
    pub uid: String,
    /// New display name.
    pub display_name: String,
    /// New email address.
    pub email: String,
    /// Key type, `s3` or `swift`.
    pub key_type: String,
    /// Access key to assign.
    pub access_key: String,
    /// Secret key to assign.
    pub secret_key: String,
    /// Capabilities.
    pub user_caps: Vec<UserCap>,
    /// Generate a new key pair. Not sent unless true.
    pub generate_key: bool,
    /// Bucket limit.
    pub max_buckets: i64,
    /// Suspend the user.
    pub suspended: bool,
}

impl UserModifyRequest {
    /// Create a request for `uid`.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

impl Schema for UserModifyRequest {
    fn type_name(&self) -> &'static str {
        "UserModifyRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const DISPLAY_NAME: FieldSpec = FieldSpec::new("display_name", "display-name");

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&DISPLAY_NAME, FieldValue::Str(&self.display_name)),
            Field::new(&EMAIL, FieldValue::Str(&self.email)),
            Field::new(&KEY_TYPE, FieldValue::Str(&self.key_type)),
            Field::new(&ACCESS_KEY, FieldValue::Str(&self.access_key)),
            Field::new(&SECRET_KEY, FieldValue::Str(&self.secret_key)),
            Field::new(&USER_CAPS, FieldValue::Caps(&self.user_caps)),
            Field::new(&GENERATE_KEY, FieldValue::Bool(self.generate_key)),
            Field::new(&MAX_BUCKETS, FieldValue::Int(self.max_buckets)),
            Field::new(&SUSPENDED, FieldValue::Bool(self.suspended)),
        ]
    }
}

/// Query for `DELETE /user`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRemoveRequest {
    /// User ID.
    pub uid: String,
    /// Also delete the user's buckets and objects. Always sent.
    pub purge_data: bool,
}

impl Schema for UserRemoveRequest {
    fn type_name(&self) -> &'static str {
        "UserRemoveRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const PURGE_DATA: FieldSpec = FieldSpec::new("purge_data", "purge-data").always();

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&PURGE_DATA, FieldValue::Bool(self.purge_data)),
        ]
    }
}

/// Query for `PUT /user?caps` and `DELETE /user?caps`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCapsRequest {
    /// User ID.
    pub uid: String,
    /// Capabilities to add or remove.
    pub user_caps: Vec<UserCap>,
}

impl UserCapsRequest {
    /// Create a request.
    pub fn new(uid: impl Into<String>, user_caps: Vec<UserCap>) -> Self {
        Self {
            uid: uid.into(),
            user_caps,
        }
    }
}

impl Schema for UserCapsRequest {
    fn type_name(&self) -> &'static str {
        "UserCapsRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const CAPS_REQUIRED: FieldSpec = FieldSpec::new("user_caps", "user-caps")
            .rules(&[Rule::Required, Rule::Dive])
            .always();

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&CAPS_REQUIRED, FieldValue::Caps(&self.user_caps)),
        ]
    }
}

/// Query for `PUT /user?subuser` and `POST /user?subuser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubUserRequest {
    /// Parent user ID.
    pub uid: String,
    /// Subuser name.
    pub subuser: String,
    /// Secret key to assign.
    pub secret_key: String,
    /// Key type, `s3` or `swift`.
    pub key_type: String,
    /// Access level: `read`, `write`, `readwrite` or `full`.
    pub access: String,
    /// Generate a secret.
    pub generate_secret: bool,
}

impl SubUserRequest {
    /// Create a request.
    pub fn new(uid: impl Into<String>, subuser: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            subuser: subuser.into(),
            ..Default::default()
        }
    }

    /// Set the access level.
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access = access.into();
        self
    }
}

impl Schema for SubUserRequest {
    fn type_name(&self) -> &'static str {
        "SubUserRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const ACCESS: FieldSpec = FieldSpec::new("access", "access")
            .rules(&[Rule::OmitEmpty, Rule::OneOf(SUBUSER_ACCESS)]);
        const GENERATE_SECRET: FieldSpec = FieldSpec::new("generate_secret", "generate-secret");

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&SUBUSER, FieldValue::Str(&self.subuser)),
            Field::new(&SECRET_KEY, FieldValue::Str(&self.secret_key)),
            Field::new(&KEY_TYPE, FieldValue::Str(&self.key_type)),
            Field::new(&ACCESS, FieldValue::Str(&self.access)),
            Field::new(&GENERATE_SECRET, FieldValue::Bool(self.generate_secret)),
        ]
    }
}

/// Query for `DELETE /user?subuser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubUserRemoveRequest {
    /// Parent user ID.
    pub uid: String,
    /// Subuser name.
    pub subuser: String,
    /// Remove the subuser's keys. The gateway purges them when unset.
    pub purge_keys: TriBool,
}

impl Schema for SubUserRemoveRequest {
    fn type_name(&self) -> &'static str {
        "SubUserRemoveRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const PURGE_KEYS: FieldSpec = FieldSpec::new("purge_keys", "purge-keys");

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&SUBUSER, FieldValue::Str(&self.subuser)),
            Field::new(&PURGE_KEYS, FieldValue::Tri(self.purge_keys)),
        ]
    }
}

// ---- keys ----

/// Query for `PUT /user?key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCreateRequest {
    /// User ID.
    pub uid: String,
    /// Subuser to create the key for.
    pub subuser: String,
    /// Access key to assign.
    pub access_key: String,
    /// Secret key to assign.
    pub secret_key: String,
    /// Key type, `s3` or `swift`.
    pub key_type: String,
    /// Generate the key. The gateway generates one when unset.
    pub generate_key: TriBool,
}

impl KeyCreateRequest {
    /// Create a request for `uid`.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

impl Schema for KeyCreateRequest {
    fn type_name(&self) -> &'static str {
        "KeyCreateRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&SUBUSER_OPTIONAL, FieldValue::Str(&self.subuser)),
            Field::new(&ACCESS_KEY, FieldValue::Str(&self.access_key)),
            Field::new(&SECRET_KEY, FieldValue::Str(&self.secret_key)),
            Field::new(&KEY_TYPE, FieldValue::Str(&self.key_type)),
            Field::new(&GENERATE_KEY, FieldValue::Tri(self.generate_key)),
        ]
    }
}

/// Query for `DELETE /user?key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRemoveRequest {
    /// Access key to remove.
    pub access_key: String,
    /// Owning user.
    pub uid: String,
    /// Owning subuser.
    pub subuser: String,
    /// Key type, `s3` or `swift`.
    pub key_type: String,
}

impl KeyRemoveRequest {
    /// Create a request for `access_key`.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            ..Default::default()
        }
    }
}

impl Schema for KeyRemoveRequest {
    fn type_name(&self) -> &'static str {
        "KeyRemoveRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const ACCESS_KEY_REQUIRED: FieldSpec = FieldSpec::new("access_key", "access-key")
            .rules(REQUIRED)
            .always();

        vec![
            Field::new(&ACCESS_KEY_REQUIRED, FieldValue::Str(&self.access_key)),
            Field::new(&UID_OPTIONAL, FieldValue::Str(&self.uid)),
            Field::new(&SUBUSER_OPTIONAL, FieldValue::Str(&self.subuser)),
            Field::new(&KEY_TYPE, FieldValue::Str(&self.key_type)),
        ]
    }
}

// ---- quotas ----

/// Query for `GET /user?quota`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaGetRequest {
    /// User ID.
    pub uid: String,
    /// `user`, `bucket`, or empty for both.
    pub quota_type: String,
}

impl Schema for QuotaGetRequest {
    fn type_name(&self) -> &'static str {
        "QuotaGetRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const QUOTA_TYPE: FieldSpec = FieldSpec::new("quota_type", "quota-type")
            .rules(&[Rule::OmitEmpty, Rule::OneOf(QUOTA_TYPES)]);

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&QUOTA_TYPE, FieldValue::Str(&self.quota_type)),
        ]
    }
}

/// Query for `PUT /user?quota`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaSetRequest {
    /// User ID.
    pub uid: String,
    /// `user` or `bucket`.
    pub quota_type: String,
    /// Object limit.
    pub max_objects: i64,
    /// Size limit in KiB.
    pub max_size_kb: i64,
    /// Enable the quota. Always sent.
    pub enabled: bool,
}

impl QuotaSetRequest {
    /// Create a request.
    pub fn new(uid: impl Into<String>, quota_type: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            quota_type: quota_type.into(),
            ..Default::default()
        }
    }

    /// Set the object limit.
    pub fn with_max_objects(mut self, max: i64) -> Self {
        self.max_objects = max;
        self
    }

    /// Set the size limit in KiB.
    pub fn with_max_size_kb(mut self, max: i64) -> Self {
        self.max_size_kb = max;
        self
    }

    /// Enable or disable the quota.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Schema for QuotaSetRequest {
    fn type_name(&self) -> &'static str {
        "QuotaSetRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const QUOTA_TYPE: FieldSpec = FieldSpec::new("quota_type", "quota-type")
            .rules(&[Rule::OneOf(QUOTA_TYPES)])
            .always();
        const MAX_OBJECTS: FieldSpec = FieldSpec::new("max_objects", "max-objects");
        const MAX_SIZE_KB: FieldSpec = FieldSpec::new("max_size_kb", "max-size-kb");
        const ENABLED: FieldSpec = FieldSpec::new("enabled", "enabled").always();

        vec![
            Field::new(&UID, FieldValue::Str(&self.uid)),
            Field::new(&QUOTA_TYPE, FieldValue::Str(&self.quota_type)),
            Field::new(&MAX_OBJECTS, FieldValue::Int(self.max_objects)),
            Field::new(&MAX_SIZE_KB, FieldValue::Int(self.max_size_kb)),
            Field::new(&ENABLED, FieldValue::Bool(self.enabled)),
        ]
    }
}

// ---- buckets ----

/// Query for `GET /bucket`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketRequest {
    /// Bucket name.
    pub bucket: String,
    /// Owning user.
    pub uid: String,
    /// Return statistics instead of names.
    pub stats: bool,
}

impl Schema for BucketRequest {
    fn type_name(&self) -> &'static str {
        "BucketRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const STATS: FieldSpec = FieldSpec::new("stats", "stats");

        vec![
            Field::new(&BUCKET_OPTIONAL, FieldValue::Str(&self.bucket)),
            Field::new(&UID_OPTIONAL, FieldValue::Str(&self.uid)),
            Field::new(&STATS, FieldValue::Bool(self.stats)),
        ]
    }
}

/// Query for `GET /bucket?index`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketIndexRequest {
    /// Bucket name.
    pub bucket: String,
    /// Check multipart object accounting.
    pub check_objects: bool,
    /// Repair the index as well as checking it.
    pub fix: bool,
}

impl BucketIndexRequest {
    /// Create a request for `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Also check objects.
    pub fn with_check_objects(mut self, check: bool) -> Self {
        self.check_objects = check;
        self
    }

    /// Repair the index.
    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }
}

impl Schema for BucketIndexRequest {
    fn type_name(&self) -> &'static str {
        "BucketIndexRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const CHECK_OBJECTS: FieldSpec = FieldSpec::new("check_objects", "check-objects");
        const FIX: FieldSpec = FieldSpec::new("fix", "fix");

        vec![
            Field::new(&BUCKET, FieldValue::Str(&self.bucket)),
            Field::new(&CHECK_OBJECTS, FieldValue::Bool(self.check_objects)),
            Field::new(&FIX, FieldValue::Bool(self.fix)),
        ]
    }
}

/// Query for `DELETE /bucket`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketRemoveRequest {
    /// Bucket name.
    pub bucket: String,
    /// Delete the bucket's objects first.
    pub purge_objects: bool,
}

impl Schema for BucketRemoveRequest {
    fn type_name(&self) -> &'static str {
        "BucketRemoveRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const PURGE_OBJECTS: FieldSpec = FieldSpec::new("purge_objects", "purge-objects");

        vec![
            Field::new(&BUCKET, FieldValue::Str(&self.bucket)),
            Field::new(&PURGE_OBJECTS, FieldValue::Bool(self.purge_objects)),
        ]
    }
}

/// Query for `PUT /bucket` (link) and `POST /bucket` (unlink).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketLinkRequest {
    /// Bucket name.
    pub bucket: String,
    /// Bucket instance ID. Only used when linking.
    pub bucket_id: String,
    /// User to link to or unlink from.
    pub uid: String,
}

impl BucketLinkRequest {
    /// Create a request.
    pub fn new(bucket: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            uid: uid.into(),
            ..Default::default()
        }
    }
}

impl Schema for BucketLinkRequest {
    fn type_name(&self) -> &'static str {
        "BucketLinkRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const BUCKET_ID: FieldSpec = FieldSpec::new("bucket_id", "bucket-id");

        vec![
            Field::new(&BUCKET, FieldValue::Str(&self.bucket)),
            Field::new(&BUCKET_ID, FieldValue::Str(&self.bucket_id)),
            Field::new(&UID, FieldValue::Str(&self.uid)),
        ]
    }
}

/// Query for `DELETE /bucket?object` and `GET /bucket?policy`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketObjectRequest {
    /// Bucket name.
    pub bucket: String,
    /// Object name.
    pub object: String,
}

impl BucketObjectRequest {
    /// Create a request.
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }
}

impl Schema for BucketObjectRequest {
    fn type_name(&self) -> &'static str {
        "BucketObjectRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const OBJECT: FieldSpec = FieldSpec::new("object", "object");

        vec![
            Field::new(&BUCKET, FieldValue::Str(&self.bucket)),
            Field::new(&OBJECT, FieldValue::Str(&self.object)),
        ]
    }
}

// ---- usage ----

/// Query for `GET /usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageRequest {
    /// Limit to one user.
    pub uid: String,
    /// Start of the range.
    pub start: Option<RadosTime>,
    /// End of the range.
    pub end: Option<RadosTime>,
    /// Include per-bucket entries.
    pub show_entries: bool,
    /// Include the summary.
    pub show_summary: bool,
}

impl Schema for UsageRequest {
    fn type_name(&self) -> &'static str {
        "UsageRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const SHOW_ENTRIES: FieldSpec = FieldSpec::new("show_entries", "show-entries");
        const SHOW_SUMMARY: FieldSpec = FieldSpec::new("show_summary", "show-summary");

        vec![
            Field::new(&UID_OPTIONAL, FieldValue::Str(&self.uid)),
            Field::new(&START, FieldValue::Time(self.start.as_ref())),
            Field::new(&END, FieldValue::Time(self.end.as_ref())),
            Field::new(&SHOW_ENTRIES, FieldValue::Bool(self.show_entries)),
            Field::new(&SHOW_SUMMARY, FieldValue::Bool(self.show_summary)),
        ]
    }
}

/// Query for `DELETE /usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimUsageRequest {
    /// Limit to one user.
    pub uid: String,
    /// Start of the range.
    pub start: Option<RadosTime>,
    /// End of the range.
    pub end: Option<RadosTime>,
    /// Required by the gateway to trim all users' usage.
    pub remove_all: bool,
}

impl Schema for TrimUsageRequest {
    fn type_name(&self) -> &'static str {
        "TrimUsageRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const REMOVE_ALL: FieldSpec = FieldSpec::new("remove_all", "remove-all");

        vec![
            Field::new(&UID_OPTIONAL, FieldValue::Str(&self.uid)),
            Field::new(&START, FieldValue::Time(self.start.as_ref())),
            Field::new(&END, FieldValue::Time(self.end.as_ref())),
            Field::new(&REMOVE_ALL, FieldValue::Bool(self.remove_all)),
        ]
    }
}

// ---- metadata ----

/// Query for `GET /metadata/{section}` with a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRequest {
    /// Metadata key, e.g. a user ID or bucket name.
    pub key: String,
}

impl Schema for MetadataRequest {
    fn type_name(&self) -> &'static str {
        "MetadataRequest"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        const KEY: FieldSpec = FieldSpec::new("key", "key").always();

        vec![Field::new(&KEY, FieldValue::Str(&self.key))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_query;
    use crate::validation::violations;

    #[test]
    fn test_user_create_requires_uid_and_display_name() {
        let found = violations(&UserCreateRequest::default());
        let names: Vec<_> = found.iter().map(|v| v.field).collect();
        assert_eq!(names, vec!["uid", "display_name"]);
    }

    #[test]
    fn test_user_create_generate_key_default_is_omitted() {
        let req = UserCreateRequest::new("alice", "Alice");
        assert_eq!(
            encode_query(&req).unwrap(),
            "display-name=Alice&uid=alice"
        );
        let req = req.with_generate_key(false);
        assert_eq!(
            encode_query(&req).unwrap(),
            "display-name=Alice&generate-key=false&uid=alice"
        );
    }

    #[test]
    fn test_user_modify_false_generate_key_is_omitted() {
        let req = UserModifyRequest::new("alice");
        assert_eq!(encode_query(&req).unwrap(), "uid=alice");
    }

    #[test]
    fn test_user_remove_always_sends_purge() {
        let req = UserRemoveRequest {
            uid: "alice".to_string(),
            purge_data: false,
        };
        assert_eq!(encode_query(&req).unwrap(), "purge-data=false&uid=alice");
    }

    #[test]
    fn test_caps_request_requires_caps() {
        let found = violations(&UserCapsRequest::new("alice", vec![]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, Rule::Required);
    }

    #[test]
    fn test_caps_encoding() {
        let req = UserCapsRequest::new(
            "alice",
            vec![UserCap::new("users", "read"), UserCap::new("usage", "read,write")],
        );
        assert_eq!(
            encode_query(&req).unwrap(),
            "uid=alice&user-caps=users%3Dread%3Busage%3Dread%2Cwrite"
        );
    }

    #[test]
    fn test_quota_set_rejects_empty_type() {
        let found = violations(&QuotaSetRequest::new("alice", ""));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].namespace, "QuotaSetRequest.quota_type");
    }

    #[test]
    fn test_quota_set_always_sends_enabled() {
        let req = QuotaSetRequest::new("alice", "user").with_max_objects(-1);
        assert_eq!(
            encode_query(&req).unwrap(),
            "enabled=false&max-objects=-1&quota-type=user&uid=alice"
        );
    }

    #[test]
    fn test_bucket_index_always_sends_bucket() {
        let found = violations(&BucketIndexRequest::default());
        assert_eq!(found[0].field, "bucket");

        let req = BucketIndexRequest::new("photos").with_fix(true);
        assert_eq!(encode_query(&req).unwrap(), "bucket=photos&fix=true");
    }

    #[test]
    fn test_subuser_access_values() {
        let req = SubUserRequest::new("alice", "alice:swift").with_access("admin");
        let found = violations(&req);
        assert_eq!(
            found[0].message(),
            "Field 'SubUserRequest.access' invalid value: 'admin', valid values are: \
             \"read\",\"write\",\"readwrite\",\"full\""
        );
    }

    #[test]
    fn test_metadata_key_always_sent() {
        let req = MetadataRequest::default();
        assert!(violations(&req).is_empty());
        assert_eq!(encode_query(&req).unwrap(), "key=");
    }
}
