//! Request dispatch.
//!
//! [`Dispatcher::prepare`] validates, encodes and signs a request without
//! touching the network. [`Dispatcher::execute`] sends it, checks the status
//! and hands the body to the caller's decoder.

use crate::credentials::Credentials;
use crate::decode::ResponseDecoder;
use crate::encoding::{encode, RequestSpec};
use crate::error::AdminError;
use crate::signing::RequestSigner;
use crate::time::{with_zone, ZoneSpec};
use crate::transport::{HttpRequest, HttpTransport};
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Shared request pipeline used by every service.
///
/// Holds no per-call state; all fields are fixed at construction.
pub struct Dispatcher {
    admin_url: Url,
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn RequestSigner>,
    credentials: Credentials,
    zone: ZoneSpec,
    raw_validator_errors: bool,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(
        admin_url: Url,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn RequestSigner>,
        credentials: Credentials,
        zone: ZoneSpec,
        raw_validator_errors: bool,
    ) -> Self {
        Self {
            admin_url,
            transport,
            signer,
            credentials,
            zone,
            raw_validator_errors,
        }
    }

    /// The admin API root.
    pub fn admin_url(&self) -> &Url {
        &self.admin_url
    }

    /// Zone used for offset-less timestamps in responses.
    pub fn zone(&self) -> ZoneSpec {
        self.zone
    }

    /// Validate, encode and sign `spec`.
    pub fn prepare(&self, spec: &RequestSpec<'_>) -> Result<HttpRequest, AdminError> {
        let request = encode(&self.admin_url, spec, self.raw_validator_errors)?;
        Ok(self.signer.sign(request, &self.credentials)?)
    }

    /// Prepare and execute `spec` in one step.
    pub async fn call<D>(&self, spec: RequestSpec<'_>, decoder: D) -> Result<D::Output, AdminError>
    where
        D: ResponseDecoder,
    {
        let request = self.prepare(&spec)?;
        self.execute(request, decoder).await
    }

    /// Send a prepared request and decode a 200 response with `decoder`.
    pub async fn execute<D>(
        &self,
        mut request: HttpRequest,
        decoder: D,
    ) -> Result<D::Output, AdminError>
    where
        D: ResponseDecoder,
    {
        let method = request.method.clone();
        let path = request_path(&request.url).to_string();
        request.read_body = decoder.wants_body();

        let response = self.transport.send(request).await?;
        debug!(method = %method, path = %path, status = response.status, "admin request completed");

        if response.status != 200 {
            return Err(AdminError::UpstreamStatus {
                status: response.status,
                status_text: response.status_text().to_string(),
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        if !decoder.wants_body() {
            return decoder.decode(Bytes::new());
        }

        let body = response.body;
        with_zone(self.zone, || decoder.decode(body))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("admin_url", &self.admin_url.as_str())
            .field("zone", &self.zone)
            .field("raw_validator_errors", &self.raw_validator_errors)
            .finish_non_exhaustive()
    }
}

/// Path of a URL without its query; queries may carry secret keys and stay
/// out of logs.
fn request_path(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    match without_query.find("://") {
        Some(scheme_end) => {
            let rest = &without_query[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => without_query,
    }
}
