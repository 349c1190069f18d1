//! Mock implementations for testing.
//!
//! [`MockTransport`] replays queued responses and records what was sent;
//! [`MockSigner`] replaces request signing; [`TestFixtures`] holds gateway
//! JSON documents.

mod signer;
mod transport;

pub use signer::{MockSigner, MOCK_AUTHORIZATION};
pub use transport::{MockResponse, MockTransport};

use crate::client::AdminClient;
use crate::config::AdminConfig;
use std::sync::Arc;

/// Test fixtures for admin operations.
pub struct TestFixtures;

impl TestFixtures {
    /// Base URL used by [`TestFixtures::config`].
    pub const SERVER_URL: &'static str = "http://rgw.test:7480";

    /// A configuration pointing at [`TestFixtures::SERVER_URL`] with UTC as
    /// the decode zone.
    pub fn config() -> AdminConfig {
        AdminConfig {
            server_url: Self::SERVER_URL.to_string(),
            admin_path: crate::config::DEFAULT_ADMIN_PATH.to_string(),
            client_timeout: std::time::Duration::from_secs(10),
            connect_timeout: std::time::Duration::from_secs(5),
            keep_alive: std::time::Duration::from_secs(30),
            max_idle_connections: 10,
            idle_timeout: std::time::Duration::from_secs(90),
            ca_cert_bundle: None,
            ca_cert_bundle_path: None,
            insecure_skip_verify: false,
            zone: crate::time::ZoneSpec::Utc,
            credentials: crate::credentials::Credentials::new("AKIDTEST", "secret"),
            raw_validator_errors: false,
            user_agent: "radosgw-admin-test".to_string(),
        }
    }

    /// A client over `transport` with the default signer.
    pub fn client(transport: Arc<MockTransport>) -> AdminClient {
        Self::client_with(Self::config(), transport)
    }

    /// A client over `transport` with a custom configuration.
    pub fn client_with(config: AdminConfig, transport: Arc<MockTransport>) -> AdminClient {
        match AdminClient::builder().config(config).transport(transport).build() {
            Ok(client) => client,
            Err(e) => panic!("fixture client: {e}"),
        }
    }

    /// Gateway error document.
    pub fn error_json(code: &str) -> String {
        format!(
            r#"{{"Code":"{}","RequestId":"tx000000000000000000001-0058ca0f00-1008-default","HostId":"1008-default-default"}}"#,
            code
        )
    }

    /// User record for `uid`.
    pub fn user_json(uid: &str) -> String {
        format!(
            r#"{{
    "user_id": "{uid}",
    "display_name": "{uid} display",
    "email": "{uid}@example.org",
    "suspended": 0,
    "max_buckets": 1000,
    "subusers": [{{"id": "{uid}:swift", "permissions": "full-control"}}],
    "keys": [{{"user": "{uid}", "access_key": "AK{uid}", "secret_key": "SK{uid}"}}],
    "swift_keys": [{{"user": "{uid}:swift", "secret_key": "SWK{uid}"}}],
    "caps": [{{"type": "usage", "perm": "*"}}, {{"type": "users", "perm": "read"}}]
}}"#
        )
    }

    /// Capability list.
    pub fn caps_json() -> &'static str {
        r#"[{"type":"buckets","perm":"*"},{"type":"usage","perm":"read"}]"#
    }

    /// Key list for `uid`.
    pub fn keys_json(uid: &str) -> String {
        format!(
            r#"[{{"user":"{uid}","access_key":"AK1","secret_key":"SK1"}},{{"user":"{uid}","access_key":"AK2","secret_key":"SK2"}}]"#
        )
    }

    /// Stats for one bucket, with an offset-less modification time.
    pub fn bucket_stats_json(bucket: &str, owner: &str) -> String {
        format!(
            r#"[{{
    "bucket": "{bucket}",
    "pool": "default.rgw.buckets.data",
    "index_pool": "default.rgw.buckets.index",
    "id": "default.4101.1",
    "marker": "default.4101.1",
    "owner": "{owner}",
    "ver": "0#3",
    "master_ver": "0#0",
    "mtime": "2017-03-16 04:19:58.443214",
    "max_marker": "0#",
    "usage": {{"rgw.main": {{"size_kb": 4, "size_kb_actual": 8, "num_objects": 2}}}},
    "bucket_quota": {{"enabled": false, "max_size_kb": -1, "max_objects": -1}}
}}]"#
        )
    }
}
