//! S3 signature version 2 request signing.
//!
//! The admin API authenticates requests with the legacy S3 scheme:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                CanonicalizedAmzHeaders +
//!                CanonicalizedResource
//!
//! Authorization: AWS <AccessKeyId>:Base64(HMAC-SHA1(SecretKey, StringToSign))
//! ```
//!
//! The gateway expects spaces in the query as `%20`. The form encoder writes
//! `+`, so [`encode_query_spaces`] rewrites the final URL once signing is done.

mod canonical;
mod signer;

pub use canonical::{canonical_amz_headers, canonical_resource, SUB_RESOURCES};
pub use signer::{RequestSigner, S3SignerV2};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Prefix of the `Authorization` header value.
pub const AUTH_PREFIX: &str = "AWS";

/// Header carrying a session token.
pub const SECURITY_TOKEN_HEADER: &str = "x-amz-security-token";

/// Format a timestamp for the `Date` header (RFC 1123, GMT).
pub fn format_http_date(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Base64 of the MD5 digest of `data`.
pub fn content_md5(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    BASE64.encode(hasher.finalize())
}

/// Base64 of HMAC-SHA1 over the string to sign.
pub fn compute_signature(secret_key: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Assemble the string to sign from its parts.
pub fn string_to_sign(
    method: &str,
    content_md5: &str,
    content_type: &str,
    date: &str,
    amz_headers: &str,
    resource: &str,
) -> String {
    format!("{method}\n{content_md5}\n{content_type}\n{date}\n{amz_headers}{resource}")
}

/// Replace `+` with `%20` in the query part of `url`. The path is untouched.
pub fn encode_query_spaces(url: &str) -> String {
    match url.split_once('?') {
        Some((base, query)) => format!("{}?{}", base, query.replace('+', "%20")),
        None => url.to_string(),
    }
}
