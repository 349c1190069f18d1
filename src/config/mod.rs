//! Configuration types for the admin client.
//!
//! This module provides [`AdminConfig`], built either programmatically through
//! [`AdminConfigBuilder`], from `RGW_ADMIN_*` environment variables, or from a
//! TOML document. All values are fixed once the client is constructed.

use crate::credentials::Credentials;
use crate::error::ConfigurationError;
use crate::time::ZoneSpec;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default admin path prefix on the gateway.
pub const DEFAULT_ADMIN_PATH: &str = "admin";

/// Configuration for the admin client.
#[derive(Clone)]
pub struct AdminConfig {
    /// Gateway base URL, e.g. `https://rgw.example.org`.
    pub server_url: String,

    /// Path prefix of the admin API, e.g. `admin`.
    pub admin_path: String,

    /// Overall per-request timeout.
    pub client_timeout: Duration,

    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// TCP keep-alive interval.
    pub keep_alive: Duration,

    /// Maximum idle pooled connections per host.
    pub max_idle_connections: usize,

    /// How long an idle pooled connection is kept.
    pub idle_timeout: Duration,

    /// PEM bundle of trusted roots. Takes precedence over the path.
    pub ca_cert_bundle: Option<Vec<u8>>,

    /// Path to a PEM bundle of trusted roots.
    pub ca_cert_bundle_path: Option<PathBuf>,

    /// Skip server certificate verification.
    pub insecure_skip_verify: bool,

    /// Zone for offset-less timestamps.
    pub zone: ZoneSpec,

    /// Signing credentials.
    pub credentials: Credentials,

    /// Return validator violations untranslated.
    pub raw_validator_errors: bool,

    /// User-Agent header value.
    pub user_agent: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("server_url", &self.server_url)
            .field("admin_path", &self.admin_path)
            .field("client_timeout", &self.client_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_idle_connections", &self.max_idle_connections)
            .field("has_ca_cert_bundle", &self.ca_cert_bundle.is_some())
            .field("ca_cert_bundle_path", &self.ca_cert_bundle_path)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("zone", &self.zone)
            .field("credentials", &self.credentials)
            .field("raw_validator_errors", &self.raw_validator_errors)
            .finish_non_exhaustive()
    }
}

impl AdminConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AdminConfigBuilder {
        AdminConfigBuilder::default()
    }

    /// Parse a TOML document. The settings may sit at the top level or under
    /// an `[admin_api]` (or `[AdminAPI]`) table.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let table: toml::Table = toml::from_str(text).map_err(|e| ConfigurationError::Load {
            message: e.to_string(),
        })?;

        let section = ["admin_api", "AdminAPI"]
            .iter()
            .find_map(|key| table.get(*key).cloned())
            .unwrap_or(toml::Value::Table(table));

        let file: FileConfig = section.try_into().map_err(|e: toml::de::Error| {
            ConfigurationError::Load {
                message: e.to_string(),
            }
        })?;

        file.into_builder().build()
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Load {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// The admin API root: server URL and admin path joined by one slash.
    pub fn admin_url(&self) -> Result<Url, ConfigurationError> {
        let joined = format!(
            "{}/{}",
            self.server_url.trim_matches('/'),
            self.admin_path.trim_matches('/')
        );
        let url = Url::parse(&joined).map_err(|e| ConfigurationError::InvalidEndpoint {
            url: joined.clone(),
            details: e.to_string(),
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigurationError::InvalidEndpoint {
                url: joined,
                details: "expected an http or https URL".to_string(),
            });
        }
        Ok(url)
    }
}

/// Builder for [`AdminConfig`].
#[derive(Default)]
pub struct AdminConfigBuilder {
    server_url: Option<String>,
    admin_path: Option<String>,
    client_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    keep_alive: Option<Duration>,
    max_idle_connections: Option<usize>,
    idle_timeout: Option<Duration>,
    ca_cert_bundle: Option<Vec<u8>>,
    ca_cert_bundle_path: Option<PathBuf>,
    insecure_skip_verify: Option<bool>,
    zone_name: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    security_token: Option<String>,
    expiration: Option<DateTime<Utc>>,
    raw_validator_errors: Option<bool>,
    user_agent: Option<String>,
    rejected_env: Option<(String, String)>,
}

impl AdminConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gateway base URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the admin path prefix.
    pub fn admin_path(mut self, path: impl Into<String>) -> Self {
        self.admin_path = Some(path.into());
        self
    }

    /// Set the overall per-request timeout.
    pub fn client_timeout(mut self, timeout: Duration) -> Self {
        self.client_timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the TCP keep-alive interval.
    pub fn keep_alive(mut self, interval: Duration) -> Self {
        self.keep_alive = Some(interval);
        self
    }

    /// Set the idle connection cap.
    pub fn max_idle_connections(mut self, max: usize) -> Self {
        self.max_idle_connections = Some(max);
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Trust the roots in this PEM bundle.
    pub fn ca_cert_bundle(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_cert_bundle = Some(pem.into());
        self
    }

    /// Trust the roots in the PEM bundle at this path.
    pub fn ca_cert_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_bundle_path = Some(path.into());
        self
    }

    /// Skip certificate verification.
    pub fn insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = Some(skip);
        self
    }

    /// Zone for offset-less timestamps: `Local`, `UTC`, an IANA name such as
    /// `America/Chicago`, or `±HH:MM`.
    pub fn zone_name(mut self, zone: impl Into<String>) -> Self {
        self.zone_name = Some(zone.into());
        self
    }

    /// Set the access key and secret key.
    pub fn credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set a session token.
    pub fn security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Set the credential expiration.
    pub fn expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Return validator violations untranslated.
    pub fn raw_validator_errors(mut self, raw: bool) -> Self {
        self.raw_validator_errors = Some(raw);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load settings from `RGW_ADMIN_*` environment variables. Values already
    /// set on the builder are overridden.
    pub fn from_env(mut self) -> Self {
        let var = |name: &str| std::env::var(format!("RGW_ADMIN_{}", name)).ok();

        if let Some(url) = var("SERVER_URL") {
            self.server_url = Some(url);
        }
        if let Some(path) = var("ADMIN_PATH") {
            self.admin_path = Some(path);
        }
        if let Some(key) = var("ACCESS_KEY_ID") {
            self.access_key_id = Some(key);
        }
        if let Some(secret) = var("SECRET_ACCESS_KEY") {
            self.secret_access_key = Some(secret);
        }
        if let Some(token) = var("SECURITY_TOKEN") {
            self.security_token = Some(token);
        }
        if let Some(timeout) = var("TIMEOUT") {
            match humantime::parse_duration(&timeout) {
                Ok(d) => self.client_timeout = Some(d),
                Err(e) => {
                    self.rejected_env = Some((
                        "RGW_ADMIN_TIMEOUT".to_string(),
                        format!("'{}': {}", timeout, e),
                    ))
                }
            }
        }
        if let Some(path) = var("CA_BUNDLE_PATH") {
            self.ca_cert_bundle_path = Some(PathBuf::from(path));
        }
        if let Some(val) = var("INSECURE_SKIP_VERIFY") {
            self.insecure_skip_verify = Some(val.to_lowercase() == "true");
        }
        if let Some(zone) = var("ZONE_NAME") {
            self.zone_name = Some(zone);
        }

        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<AdminConfig, ConfigurationError> {
        if let Some((field, message)) = self.rejected_env {
            return Err(ConfigurationError::InvalidConfiguration { field, message });
        }
        let server_url = self.server_url.ok_or_else(|| ConfigurationError::MissingField {
            field: "server_url".to_string(),
        })?;
        let access_key_id = self.access_key_id.ok_or_else(|| ConfigurationError::MissingField {
            field: "access_key_id".to_string(),
        })?;
        let secret_access_key =
            self.secret_access_key
                .ok_or_else(|| ConfigurationError::MissingField {
                    field: "secret_access_key".to_string(),
                })?;

        let max_idle_connections = self.max_idle_connections.unwrap_or(100);
        if max_idle_connections == 0 {
            return Err(ConfigurationError::InvalidConfiguration {
                field: "max_idle_connections".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let zone = match self.zone_name.as_deref() {
            Some(name) => ZoneSpec::parse(name)?,
            None => ZoneSpec::default(),
        };

        let mut credentials = Credentials::new(access_key_id, secret_access_key);
        if let Some(token) = self.security_token.filter(|t| !t.is_empty()) {
            credentials = credentials.with_session_token(token);
        }
        if let Some(expiration) = self.expiration {
            credentials = credentials.with_expiration(expiration);
        }

        let config = AdminConfig {
            server_url,
            admin_path: self
                .admin_path
                .unwrap_or_else(|| DEFAULT_ADMIN_PATH.to_string()),
            client_timeout: self.client_timeout.unwrap_or(Duration::from_secs(30)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(30)),
            keep_alive: self.keep_alive.unwrap_or(Duration::from_secs(30)),
            max_idle_connections,
            idle_timeout: self.idle_timeout.unwrap_or(Duration::from_secs(90)),
            ca_cert_bundle: self.ca_cert_bundle.filter(|b| !b.is_empty()),
            ca_cert_bundle_path: self.ca_cert_bundle_path,
            insecure_skip_verify: self.insecure_skip_verify.unwrap_or(false),
            zone,
            credentials,
            raw_validator_errors: self.raw_validator_errors.unwrap_or(false),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("radosgw-admin/{}", env!("CARGO_PKG_VERSION"))),
        };

        config.admin_url()?;
        Ok(config)
    }
}

/// On-disk form of the configuration. CamelCase key names from older config
/// files are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    #[serde(alias = "ServerURL")]
    server_url: Option<String>,
    #[serde(alias = "AdminPath")]
    admin_path: Option<String>,
    #[serde(alias = "ClientTimeout", deserialize_with = "duration_text")]
    client_timeout: Option<Duration>,
    #[serde(deserialize_with = "duration_text")]
    connect_timeout: Option<Duration>,
    #[serde(deserialize_with = "duration_text")]
    keep_alive: Option<Duration>,
    max_idle_connections: Option<usize>,
    #[serde(deserialize_with = "duration_text")]
    idle_timeout: Option<Duration>,
    #[serde(alias = "CACertBundle")]
    ca_cert_bundle: Option<String>,
    #[serde(alias = "CACertBundlePath")]
    ca_cert_bundle_path: Option<PathBuf>,
    #[serde(alias = "InsecureSkipVerify")]
    insecure_skip_verify: Option<bool>,
    #[serde(alias = "ZoneName")]
    zone_name: Option<String>,
    #[serde(alias = "AccessKeyID")]
    access_key_id: Option<String>,
    #[serde(alias = "SecretAccessKey")]
    secret_access_key: Option<String>,
    #[serde(alias = "SecurityToken")]
    security_token: Option<String>,
    #[serde(alias = "Expiration")]
    expiration: Option<DateTime<Utc>>,
    #[serde(alias = "RawValidatorErrors")]
    raw_validator_errors: Option<bool>,
    user_agent: Option<String>,
}

impl FileConfig {
    fn into_builder(self) -> AdminConfigBuilder {
        AdminConfigBuilder {
            server_url: self.server_url,
            admin_path: self.admin_path,
            client_timeout: self.client_timeout,
            connect_timeout: self.connect_timeout,
            keep_alive: self.keep_alive,
            max_idle_connections: self.max_idle_connections,
            idle_timeout: self.idle_timeout,
            ca_cert_bundle: self.ca_cert_bundle.map(String::into_bytes),
            ca_cert_bundle_path: self.ca_cert_bundle_path,
            insecure_skip_verify: self.insecure_skip_verify,
            zone_name: self.zone_name,
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            security_token: self.security_token,
            expiration: self.expiration,
            raw_validator_errors: self.raw_validator_errors,
            user_agent: self.user_agent,
            rejected_env: None,
        }
    }
}

/// Human-friendly duration text such as `10s` or `1m 30s`. Empty text means
/// unset.
fn duration_text<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text: Option<String> = Option::deserialize(deserializer)?;
    match text.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => humantime::parse_duration(t)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
