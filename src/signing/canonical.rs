//! Canonicalization for S3 signature version 2.

use std::collections::BTreeMap;

/// Sub-resources that become part of the canonical resource when the raw
/// query starts with them.
pub const SUB_RESOURCES: &[&str] = &[
    "acl",
    "lifecycle",
    "location",
    "logging",
    "notification",
    "partNumber",
    "policy",
    "requestPayment",
    "torrent",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
];

/// Build the CanonicalizedAmzHeaders string.
///
/// `x-amz-*` headers are lowercased and sorted by name. Each becomes
/// `name:value\n`; repeated names have their values comma-joined.
pub fn canonical_amz_headers<'a, I>(headers: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut amz: BTreeMap<String, Vec<&str>> = BTreeMap::new();

    for (name, value) in headers {
        let name = name.to_lowercase();
        if name.starts_with("x-amz-") {
            amz.entry(name).or_default().push(value.trim());
        }
    }

    amz.iter()
        .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
        .collect()
}

/// Build the CanonicalizedResource string from the URL path and raw query.
pub fn canonical_resource(path: &str, raw_query: &str) -> String {
    let mut resource = if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    };

    for sub in SUB_RESOURCES {
        if raw_query.starts_with(sub) {
            resource.push('?');
            resource.push_str(sub);
        }
    }
    resource
}
