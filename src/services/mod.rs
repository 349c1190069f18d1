//! Admin API service implementations.
//!
//! One service per resource family:
//! - Users: user, subuser and capability operations
//! - Keys: access key creation and removal
//! - Quotas: user and bucket quotas
//! - Buckets: listing, stats, index check, linking and removal
//! - Usage: usage log query and trim
//! - Metadata: raw user, bucket and bucket instance metadata

mod buckets;
mod keys;
mod metadata;
mod quotas;
mod usage;
mod users;

pub use buckets::BucketsService;
pub use keys::KeysService;
pub use metadata::MetadataService;
pub use quotas::QuotasService;
pub use usage::UsageService;
pub use users::UsersService;
