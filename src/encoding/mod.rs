//! Request encoding.
//!
//! Turns a [`RequestSpec`] (verb, relative path, optional query struct and
//! optional JSON body) into an unsigned [`HttpRequest`]. Query and body are
//! validated first; nothing is encoded if either fails.

use crate::error::{AdminError, EncodeError};
use crate::transport::HttpRequest;
use crate::validation::{validate, FieldValue, Schema};
use reqwest::Method;
use serde::Serialize;
use url::Url;

/// Marker appended to every admin request.
pub const FORMAT_JSON: &str = "format=json";

/// A request body: validated like a query struct, then sent as JSON.
pub trait RequestBody: Schema {
    /// Serialize the body.
    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error>;

    /// The body's field table.
    fn as_schema(&self) -> &dyn Schema;
}

impl<T: Schema + Serialize> RequestBody for T {
    fn as_schema(&self) -> &dyn Schema {
        self
    }

    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Everything needed to build one admin request.
pub struct RequestSpec<'a> {
    /// HTTP verb.
    pub method: Method,
    /// Path relative to the admin root, possibly with a query such as
    /// `user?caps`.
    pub path: String,
    /// Query parameters.
    pub query: Option<&'a dyn Schema>,
    /// JSON body.
    pub body: Option<&'a dyn RequestBody>,
}

impl<'a> RequestSpec<'a> {
    /// Create a spec with no query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    /// `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query parameters.
    pub fn query(mut self, query: &'a dyn Schema) -> Self {
        self.query = Some(query);
        self
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: &'a dyn RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

impl std::fmt::Debug for RequestSpec<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSpec")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query.map(|q| q.type_name()))
            .field("body", &self.body.map(|b| b.type_name()))
            .finish()
    }
}

/// Query parameters of `value` as `(wire name, text)` pairs, sorted by name.
pub fn query_pairs(value: &dyn Schema) -> Result<Vec<(&'static str, String)>, EncodeError> {
    let mut pairs = Vec::new();

    for field in value.fields() {
        if field.spec.omit_empty && field.value.is_empty() {
            continue;
        }

        let text = match field.value {
            FieldValue::Str(s) => s.to_string(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Tri(t) => match t.as_option() {
                Some(b) => b.to_string(),
                None => continue,
            },
            FieldValue::Time(Some(t)) => t.format()?,
            FieldValue::Time(None) => continue,
            FieldValue::Caps(caps) => caps
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(";"),
        };
        pairs.push((field.spec.wire, text));
    }

    pairs.sort_by(|a, b| a.0.cmp(b.0));
    Ok(pairs)
}

/// Form-encode the query parameters of `value`. Spaces come out as `+`.
pub fn encode_query(value: &dyn Schema) -> Result<String, EncodeError> {
    let pairs = query_pairs(value)?;
    Ok(serde_urlencoded::to_string(pairs)?)
}

/// Join a relative path onto the admin root with exactly one slash.
pub fn join_path(admin_url: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        admin_url.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn append_query(url: &mut String, query: &str) {
    if query.is_empty() {
        return;
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(query);
}

/// Build the unsigned request for `spec`.
pub fn encode(
    admin_url: &Url,
    spec: &RequestSpec<'_>,
    raw_validator_errors: bool,
) -> Result<HttpRequest, AdminError> {
    let mut url = join_path(admin_url, &spec.path);

    if let Some(query) = spec.query {
        validate(query, raw_validator_errors)?;
        append_query(&mut url, &encode_query(query)?);
    }

    let mut body = None;
    if let Some(payload) = spec.body {
        validate(payload.as_schema(), raw_validator_errors)?;
        body = Some(payload.to_json().map_err(EncodeError::from)?);
    }

    append_query(&mut url, FORMAT_JSON);

    Url::parse(&url).map_err(|e| EncodeError::InvalidUrl {
        url: url.clone(),
        details: e.to_string(),
    })?;

    let mut request = HttpRequest::new(spec.method.as_str(), url);
    if let Some(body) = body {
        request = request
            .with_header("Content-Type", "application/json")
            .with_body(body);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::RadosTime;
    use crate::types::{TriBool, UserCap};
    use crate::validation::{Field, FieldSpec, Rule};
    use chrono::{TimeZone, Utc};

    struct Sample {
        uid: String,
        display_name: String,
        generate_key: TriBool,
        purge: bool,
        max_buckets: i64,
        start: Option<RadosTime>,
        caps: Vec<UserCap>,
    }

    impl Schema for Sample {
        fn type_name(&self) -> &'static str {
            "Sample"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            const UID: FieldSpec = FieldSpec::new("uid", "uid").rules(&[Rule::Required]);
            const DISPLAY: FieldSpec = FieldSpec::new("display_name", "display-name");
            const GENERATE: FieldSpec = FieldSpec::new("generate_key", "generate-key");
            const PURGE: FieldSpec = FieldSpec::new("purge_data", "purge-data").always();
            const MAX: FieldSpec = FieldSpec::new("max_buckets", "max-buckets");
            const START: FieldSpec = FieldSpec::new("start", "start");
            const CAPS: FieldSpec = FieldSpec::new("user_caps", "user-caps");

            vec![
                Field::new(&UID, FieldValue::Str(&self.uid)),
                Field::new(&DISPLAY, FieldValue::Str(&self.display_name)),
                Field::new(&GENERATE, FieldValue::Tri(self.generate_key)),
                Field::new(&PURGE, FieldValue::Bool(self.purge)),
                Field::new(&MAX, FieldValue::Int(self.max_buckets)),
                Field::new(&START, FieldValue::Time(self.start.as_ref())),
                Field::new(&CAPS, FieldValue::Caps(&self.caps)),
            ]
        }
    }

    fn sample() -> Sample {
        Sample {
            uid: "alice".to_string(),
            display_name: String::new(),
            generate_key: TriBool::Unset,
            purge: false,
            max_buckets: 0,
            start: None,
            caps: Vec::new(),
        }
    }

    fn admin() -> Url {
        Url::parse("https://rgw.example.org/admin").unwrap()
    }

    #[test]
    fn test_omits_empty_and_sorts() {
        let mut s = sample();
        s.max_buckets = 5;
        let query = encode_query(&s).unwrap();
        assert_eq!(query, "max-buckets=5&purge-data=false&uid=alice");
    }

    #[test]
    fn test_false_sentinel_is_sent() {
        let mut s = sample();
        s.generate_key = TriBool::False;
        let query = encode_query(&s).unwrap();
        assert!(query.contains("generate-key=false"));

        s.generate_key = TriBool::Unset;
        assert!(!encode_query(&s).unwrap().contains("generate-key"));
    }

    #[test]
    fn test_spaces_become_plus() {
        let mut s = sample();
        s.display_name = "Alice Example".to_string();
        assert!(encode_query(&s).unwrap().contains("display-name=Alice+Example"));
    }

    #[test]
    fn test_caps_joined_with_semicolon() {
        let mut s = sample();
        s.caps = vec![UserCap::new("users", "read"), UserCap::new("usage", "*")];
        let pairs = query_pairs(&s).unwrap();
        let caps = pairs.iter().find(|(k, _)| *k == "user-caps").unwrap();
        assert_eq!(caps.1, "users=read;usage=*");
    }

    #[test]
    fn test_time_parameter() {
        let mut s = sample();
        s.start = Some(RadosTime::from(
            Utc.with_ymd_and_hms(2017, 3, 16, 4, 0, 0).unwrap(),
        ));
        let pairs = query_pairs(&s).unwrap();
        let start = pairs.iter().find(|(k, _)| *k == "start").unwrap();
        assert_eq!(start.1, "2017-03-16 04:00:00.000000Z");
    }

    #[test]
    fn test_join_path_single_slash() {
        assert_eq!(
            join_path(&admin(), "///user"),
            "https://rgw.example.org/admin/user"
        );
    }

    #[test]
    fn test_encode_appends_to_existing_query() {
        let s = sample();
        let spec = RequestSpec::put("/user?caps").query(&s);
        let request = encode(&admin(), &spec, false).unwrap();
        assert_eq!(request.method, "PUT");
        assert_eq!(
            request.url,
            "https://rgw.example.org/admin/user?caps&purge-data=false&uid=alice&format=json"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_encode_without_query_still_marks_format() {
        let spec = RequestSpec::get("metadata/user");
        let request = encode(&admin(), &spec, false).unwrap();
        assert_eq!(
            request.url,
            "https://rgw.example.org/admin/metadata/user?format=json"
        );
    }

    #[test]
    fn test_validation_stops_encoding() {
        let mut s = sample();
        s.uid.clear();
        let spec = RequestSpec::get("user").query(&s);
        let err = encode(&admin(), &spec, false).unwrap_err();
        assert!(err.is_validation());
    }
}
