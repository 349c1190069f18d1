//! RADOS Gateway Admin Ops client
//!
//! Typed access to the Ceph Object Gateway admin API: users, subusers, keys,
//! capabilities, quotas, buckets, usage and metadata.
//!
//! # Features
//!
//! - **Validation before sending**: request structs declare their rules and
//!   are checked before any I/O
//! - **Signature version 2**: requests are signed the way the gateway's S3
//!   front end expects
//! - **Zone-aware timestamps**: offset-less times from older gateways are read
//!   in a configurable zone
//! - **Per-call deadlines and cancellation** through [`RequestContext`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use radosgw_admin::{AdminConfig, UserCreateRequest};
//!
//! #[tokio::main]
//! async fn main() -> radosgw_admin::Result<()> {
//!     let config = AdminConfig::builder()
//!         .server_url("https://rgw.example.org")
//!         .credentials("ADMIN_ACCESS_KEY", "ADMIN_SECRET_KEY")
//!         .build()?;
//!     let client = radosgw_admin::create_client(config)?;
//!
//!     let user = client
//!         .users()
//!         .create(UserCreateRequest::new("alice", "Alice").with_email("alice@example.org"))
//!         .await?;
//!
//!     println!("created {} with {} key(s)", user.user_id, user.keys.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod decode;
pub mod encoding;
pub mod error;
pub mod mocks;
pub mod services;
pub mod signing;
pub mod time;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use client::{AdminClient, AdminClientBuilder, Dispatcher, RequestContext};
pub use config::AdminConfig;
pub use credentials::Credentials;
pub use decode::{BucketIndexDecoder, Discard, JsonDecoder, ResponseDecoder};
pub use encoding::RequestSpec;
pub use error::{
    AdminError, ConfigurationError, DecodeError, EncodeError, TransportError, ValidationError,
};
pub use services::{
    BucketsService, KeysService, MetadataService, QuotasService, UsageService, UsersService,
};
pub use signing::{RequestSigner, S3SignerV2};
pub use time::{RadosTime, ZoneSpec};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    // Request types
    BucketIndexRequest,
    BucketLinkRequest,
    BucketObjectRequest,
    BucketRemoveRequest,
    BucketRequest,
    KeyCreateRequest,
    KeyRemoveRequest,
    MetadataRequest,
    QuotaGetRequest,
    QuotaSetRequest,
    SubUserRemoveRequest,
    SubUserRequest,
    TrimUsageRequest,
    UsageRequest,
    UserCapsRequest,
    UserCreateRequest,
    UserInfoRequest,
    UserModifyRequest,
    UserRemoveRequest,
    // Response types
    BucketIndexResponse,
    BucketPolicyResponse,
    BucketStatsResponse,
    MBucketInstanceResponse,
    MBucketResponse,
    MUserResponse,
    QuotaMeta,
    Quotas,
    UsageResponse,
    UserInfoResponse,
    UserKey,
    // Common types
    TriBool,
    UserCap,
};
pub use validation::FieldViolation;

/// Create a new client from `RGW_ADMIN_*` environment variables.
///
/// Reads `RGW_ADMIN_SERVER_URL`, `RGW_ADMIN_ACCESS_KEY_ID` and
/// `RGW_ADMIN_SECRET_ACCESS_KEY`, plus the optional settings documented on
/// [`config::AdminConfigBuilder::from_env`].
///
/// # Example
///
/// ```rust,no_run
/// let client = radosgw_admin::create_client_from_env()?;
/// # Ok::<(), radosgw_admin::AdminError>(())
/// ```
pub fn create_client_from_env() -> Result<AdminClient> {
    AdminClientBuilder::new().from_env().build()
}

/// Create a new client with explicit configuration.
///
/// # Example
///
/// ```rust,no_run
/// use radosgw_admin::AdminConfig;
///
/// let config = AdminConfig::builder()
///     .server_url("http://127.0.0.1:7480")
///     .credentials("AKID", "SECRET")
///     .zone_name("UTC")
///     .build()?;
///
/// let client = radosgw_admin::create_client(config)?;
/// # Ok::<(), radosgw_admin::AdminError>(())
/// ```
pub fn create_client(config: AdminConfig) -> Result<AdminClient> {
    AdminClientBuilder::new().config(config).build()
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
