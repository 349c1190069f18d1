//! Signature version 2 signer implementation.

use super::*;
use crate::credentials::Credentials;
use crate::error::EncodeError;
use crate::transport::HttpRequest;
use tracing::trace;
use url::Url;

/// Trait for request signers.
///
/// Signers take the credentials by reference and keep no state between
/// calls, so one signer can serve concurrent requests.
pub trait RequestSigner: Send + Sync {
    /// Sign `request` and apply the final query fixups. The returned request
    /// is ready to send.
    fn sign(
        &self,
        request: HttpRequest,
        credentials: &Credentials,
    ) -> Result<HttpRequest, EncodeError>;
}

/// S3 signature version 2 signer.
#[derive(Debug, Clone, Copy, Default)]
pub struct S3SignerV2;

impl S3SignerV2 {
    /// Create a new signer.
    pub fn new() -> Self {
        Self
    }

    /// Sign as of `timestamp`.
    pub fn sign_at(
        &self,
        mut request: HttpRequest,
        credentials: &Credentials,
        timestamp: &DateTime<Utc>,
    ) -> Result<HttpRequest, EncodeError> {
        let url = Url::parse(&request.url).map_err(|e| EncodeError::InvalidUrl {
            url: request.url.clone(),
            details: e.to_string(),
        })?;

        if let Some(token) = credentials.session_token() {
            request
                .headers
                .insert(SECURITY_TOKEN_HEADER.to_string(), token.to_string());
        }

        let date = format_http_date(timestamp);
        request.headers.insert("Date".to_string(), date.clone());

        let md5 = match request.get_header("content-md5") {
            Some(existing) => existing.to_string(),
            None => {
                let digest = request
                    .body
                    .as_ref()
                    .filter(|b| !b.is_empty())
                    .map(|b| content_md5(b));
                match digest {
                    Some(digest) => {
                        request
                            .headers
                            .insert("Content-MD5".to_string(), digest.clone());
                        digest
                    }
                    None => String::new(),
                }
            }
        };
        let content_type = request.get_header("content-type").unwrap_or("").to_string();

        let sts = string_to_sign(
            &request.method,
            &md5,
            &content_type,
            &date,
            &canonical_amz_headers(&request.headers),
            &canonical_resource(url.path(), url.query().unwrap_or("")),
        );
        trace!(string_to_sign = %sts, "computed signature v2 string to sign");

        let signature = compute_signature(credentials.secret_access_key(), &sts);
        request.headers.insert(
            "Authorization".to_string(),
            format!(
                "{} {}:{}",
                AUTH_PREFIX,
                credentials.access_key_id(),
                signature
            ),
        );

        request.url = encode_query_spaces(&request.url);
        Ok(request)
    }
}

impl RequestSigner for S3SignerV2 {
    fn sign(
        &self,
        request: HttpRequest,
        credentials: &Credentials,
    ) -> Result<HttpRequest, EncodeError> {
        self.sign_at(request, credentials, &Utc::now())
    }
}
