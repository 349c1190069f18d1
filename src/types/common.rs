//! Common types shared by admin requests and responses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A boolean parameter that the gateway treats as `true` when omitted.
///
/// `Unset` leaves the parameter off the wire so the gateway default applies;
/// `False` sends an explicit `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriBool {
    /// Not sent.
    #[default]
    Unset,
    /// Sent as `true`.
    True,
    /// Sent as `false`.
    False,
}

impl TriBool {
    /// The value as an optional bool.
    pub fn as_option(&self) -> Option<bool> {
        match self {
            TriBool::Unset => None,
            TriBool::True => Some(true),
            TriBool::False => Some(false),
        }
    }

    /// True if no value was chosen.
    pub fn is_unset(&self) -> bool {
        matches!(self, TriBool::Unset)
    }
}

impl From<bool> for TriBool {
    fn from(value: bool) -> Self {
        if value {
            TriBool::True
        } else {
            TriBool::False
        }
    }
}

impl From<Option<bool>> for TriBool {
    fn from(value: Option<bool>) -> Self {
        value.map(TriBool::from).unwrap_or_default()
    }
}

/// Capability kinds a user may be granted.
pub const CAP_TYPES: &[&str] = &["users", "buckets", "metadata", "usage", "zone"];

/// Permissions a capability may carry.
pub const CAP_PERMS: &[&str] = &["*", "read", "write", "read,write"];

/// A user capability such as `users=read`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserCap {
    /// Capability kind, one of [`CAP_TYPES`].
    #[serde(rename = "type")]
    pub cap_type: String,
    /// Permission, one of [`CAP_PERMS`].
    pub perm: String,
}

impl UserCap {
    /// Create a capability.
    pub fn new(cap_type: impl Into<String>, perm: impl Into<String>) -> Self {
        Self {
            cap_type: cap_type.into(),
            perm: perm.into(),
        }
    }
}

impl fmt::Display for UserCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.cap_type, self.perm)
    }
}

/// Access levels for subusers.
pub const SUBUSER_ACCESS: &[&str] = &["read", "write", "readwrite", "full"];

/// Key types accepted by the gateway.
pub const KEY_TYPES: &[&str] = &["s3", "swift"];

/// Quota scopes.
pub const QUOTA_TYPES: &[&str] = &["user", "bucket"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tribool_conversions() {
        assert_eq!(TriBool::from(true), TriBool::True);
        assert_eq!(TriBool::from(false), TriBool::False);
        assert_eq!(TriBool::from(None), TriBool::Unset);
        assert_eq!(TriBool::False.as_option(), Some(false));
        assert!(TriBool::default().is_unset());
    }

    #[test]
    fn test_user_cap_display_and_json() {
        let cap = UserCap::new("usage", "read,write");
        assert_eq!(cap.to_string(), "usage=read,write");

        let json = serde_json::to_string(&cap).unwrap();
        assert_eq!(json, r#"{"type":"usage","perm":"read,write"}"#);
    }
}
