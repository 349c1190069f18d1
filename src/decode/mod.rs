//! Response decoding.
//!
//! The dispatcher hands a successful body to a [`ResponseDecoder`] chosen by
//! the calling operation. Most endpoints return one JSON document and use
//! [`JsonDecoder`]. Calls that do not care about the payload use
//! [`Discard`]. The bucket index check returns a JSON array immediately
//! followed by a JSON object and is read by [`BucketIndexDecoder`].

use crate::error::{AdminError, DecodeError};
use crate::types::{BucketIndexHeaders, BucketIndexResponse};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Turns a response body into a typed value.
pub trait ResponseDecoder: Send + Sync {
    /// Decoded type.
    type Output;

    /// True if the body should be read at all.
    fn wants_body(&self) -> bool {
        true
    }

    /// Decode the body.
    fn decode(&self, body: Bytes) -> Result<Self::Output, AdminError>;
}

/// Decodes a single JSON document.
pub struct JsonDecoder<T>(PhantomData<fn() -> T>);

impl<T> JsonDecoder<T> {
    /// Create a decoder.
    pub fn new() -> Self {
        JsonDecoder(PhantomData)
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> ResponseDecoder for JsonDecoder<T> {
    type Output = T;

    fn decode(&self, body: Bytes) -> Result<T, AdminError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody.into());
        }
        Ok(serde_json::from_slice(&body).map_err(DecodeError::from)?)
    }
}

/// Ignores the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ResponseDecoder for Discard {
    type Output = ();

    fn wants_body(&self) -> bool {
        false
    }

    fn decode(&self, _body: Bytes) -> Result<(), AdminError> {
        Ok(())
    }
}

/// Reads the bucket index check response: an array of object names, then,
/// when present, an object with the existing and recalculated usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketIndexDecoder;

impl ResponseDecoder for BucketIndexDecoder {
    type Output = BucketIndexResponse;

    fn decode(&self, body: Bytes) -> Result<BucketIndexResponse, AdminError> {
        decode_bucket_index(&body).map_err(AdminError::from)
    }
}

/// Decode the concatenated array-then-object bucket index document.
///
/// The stream deserializer tracks value boundaries itself; the second value
/// is optional and its absence leaves the headers at their defaults.
pub fn decode_bucket_index(body: &[u8]) -> Result<BucketIndexResponse, DecodeError> {
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<serde_json::Value>();

    let new_objects: Vec<String> = match stream.next() {
        Some(value) => serde_json::from_value(value?)?,
        None => return Err(DecodeError::EmptyBody),
    };

    let headers: BucketIndexHeaders = match stream.next() {
        Some(value) => serde_json::from_value(value?)?,
        None => BucketIndexHeaders::default(),
    };

    Ok(BucketIndexResponse {
        new_objects,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_decoder() {
        let decoder = JsonDecoder::<Vec<String>>::new();
        let out = decoder.decode(Bytes::from_static(br#"["a","b"]"#)).unwrap();
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_json_decoder_empty_body() {
        let decoder = JsonDecoder::<Vec<String>>::new();
        let err = decoder.decode(Bytes::from_static(b"  \n")).unwrap_err();
        assert!(matches!(err, AdminError::Decode(DecodeError::EmptyBody)));
    }

    #[test]
    fn test_json_decoder_wrong_shape() {
        let decoder = JsonDecoder::<Vec<String>>::new();
        let err = decoder.decode(Bytes::from_static(br#"{"a":1}"#)).unwrap_err();
        assert!(matches!(err, AdminError::Decode(DecodeError::Json(_))));
    }

    #[test]
    fn test_discard_skips_body() {
        assert!(!Discard.wants_body());
        assert!(Discard.decode(Bytes::from_static(b"not json")).is_ok());
    }

    #[test]
    fn test_bucket_index_with_headers() {
        let body = br#"["a.json","b.json","c.json"]{"existing_header":{"usage":{"rgw.main":{"size_kb":4,"size_kb_actual":8,"num_objects":3}}},"calculated_header":{"usage":{}}}"#;
        let out = decode_bucket_index(body).unwrap();
        assert_eq!(out.new_objects.len(), 3);

        let existing = out.headers.existing_header.unwrap();
        let main = existing.usage.rgw_main.unwrap();
        assert_eq!(main.num_objects, 3);
        assert!(out.headers.calculated_header.is_some());
    }

    #[test]
    fn test_bucket_index_array_only() {
        let out = decode_bucket_index(br#"["a.json","b.json","c.json"]"#).unwrap();
        assert_eq!(out.new_objects, vec!["a.json", "b.json", "c.json"]);
        assert_eq!(out.headers, BucketIndexHeaders::default());
    }

    #[test]
    fn test_bucket_index_whitespace_between_values() {
        let out = decode_bucket_index(b"[]\n  {\"existing_header\":{\"usage\":{}}}\n").unwrap();
        assert!(out.new_objects.is_empty());
        assert!(out.headers.existing_header.is_some());
    }

    #[test]
    fn test_bucket_index_rejects_garbage() {
        assert!(decode_bucket_index(b"").is_err());
        assert!(decode_bucket_index(b"[\"a\"] nonsense").is_err());
        assert!(decode_bucket_index(br#"{"not":"an array"}"#).is_err());
    }
}
