//! Admin client implementation.
//!
//! This module provides [`AdminClient`], its builder, and the request
//! pipeline shared by every service.

mod context;
mod dispatcher;

pub use context::RequestContext;
pub use dispatcher::Dispatcher;

use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::services::{
    BucketsService, KeysService, MetadataService, QuotasService, UsageService, UsersService,
};
use crate::signing::{RequestSigner, S3SignerV2};
use crate::transport::{HttpTransport, ReqwestTransport};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Client for the RADOS Gateway admin API.
///
/// Cheap to share behind an `Arc`; all state is immutable after
/// construction, so concurrent calls need no coordination.
pub struct AdminClient {
    config: Arc<AdminConfig>,
    dispatcher: Arc<Dispatcher>,

    // Lazy-initialized services
    users: OnceCell<UsersService>,
    keys: OnceCell<KeysService>,
    quotas: OnceCell<QuotasService>,
    buckets: OnceCell<BucketsService>,
    usage: OnceCell<UsageService>,
    metadata: OnceCell<MetadataService>,
}

impl AdminClient {
    /// Start building a client.
    pub fn builder() -> AdminClientBuilder {
        AdminClientBuilder::new()
    }

    /// Create a client over an existing transport and signer.
    pub fn new(
        config: AdminConfig,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, AdminError> {
        let admin_url = config.admin_url()?;
        let dispatcher = Dispatcher::new(
            admin_url,
            transport,
            signer,
            config.credentials.clone(),
            config.zone,
            config.raw_validator_errors,
        );

        Ok(Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            users: OnceCell::new(),
            keys: OnceCell::new(),
            quotas: OnceCell::new(),
            buckets: OnceCell::new(),
            usage: OnceCell::new(),
            metadata: OnceCell::new(),
        })
    }

    /// User, subuser and capability operations.
    pub fn users(&self) -> &UsersService {
        self.users
            .get_or_init(|| UsersService::new(self.dispatcher.clone()))
    }

    /// Access key operations.
    pub fn keys(&self) -> &KeysService {
        self.keys
            .get_or_init(|| KeysService::new(self.dispatcher.clone()))
    }

    /// Quota operations.
    pub fn quotas(&self) -> &QuotasService {
        self.quotas
            .get_or_init(|| QuotasService::new(self.dispatcher.clone()))
    }

    /// Bucket operations.
    pub fn buckets(&self) -> &BucketsService {
        self.buckets
            .get_or_init(|| BucketsService::new(self.dispatcher.clone()))
    }

    /// Usage log operations.
    pub fn usage(&self) -> &UsageService {
        self.usage
            .get_or_init(|| UsageService::new(self.dispatcher.clone()))
    }

    /// Metadata operations.
    pub fn metadata(&self) -> &MetadataService {
        self.metadata
            .get_or_init(|| MetadataService::new(self.dispatcher.clone()))
    }

    /// The request pipeline, for endpoints without a dedicated service.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The client configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AdminClient`].
pub struct AdminClientBuilder {
    config: Option<AdminConfig>,
    from_env: bool,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl AdminClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            from_env: false,
            transport: None,
            signer: None,
        }
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: AdminConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from `RGW_ADMIN_*` environment variables.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom HTTP transport. TLS and pool settings in the
    /// configuration are then ignored.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom request signer instead of signature version 2.
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AdminClient, AdminError> {
        let config = match self.config {
            Some(config) => config,
            None if self.from_env => AdminConfig::builder().from_env().build()?,
            None => {
                return Err(crate::error::ConfigurationError::MissingField {
                    field: "config".to_string(),
                }
                .into())
            }
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config)?),
        };

        let signer = self
            .signer
            .unwrap_or_else(|| Arc::new(S3SignerV2::new()) as Arc<dyn RequestSigner>);

        AdminClient::new(config, transport, signer)
    }
}

impl Default for AdminClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::mocks::MockTransport;

    fn config() -> AdminConfig {
        AdminConfig::builder()
            .server_url("http://rgw.local:7480")
            .credentials("akid", "secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_config() {
        let err = AdminClientBuilder::new().build().unwrap_err();
        assert!(matches!(
            err,
            AdminError::Configuration(ConfigurationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_builder_with_config() {
        let client = AdminClientBuilder::new().config(config()).build().unwrap();
        assert_eq!(client.config().server_url, "http://rgw.local:7480");
        assert_eq!(
            client.dispatcher().admin_url().as_str(),
            "http://rgw.local:7480/admin"
        );
    }

    #[test]
    fn test_services_are_created_once() {
        let client = AdminClient::builder()
            .config(config())
            .transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();

        let first = client.users() as *const UsersService;
        let second = client.users() as *const UsersService;
        assert_eq!(first, second);
    }
}
