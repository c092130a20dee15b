use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Static identity card a plugin reports to the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Oldest host release this plugin speaks the contract of.
    pub min_host_version: String,
}

/// Descriptive catalog entry for a scope pattern a plugin serves.
///
/// Catalog entries are documentation for operators; whether a concrete scope
/// string is accepted is decided by [`CredentialPlugin::match_scope`], which
/// may be wider than the catalog.
///
/// [`CredentialPlugin::match_scope`]: crate::CredentialPlugin::match_scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSpec {
    pub pattern: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// A single credential request from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequest {
    pub scope: String,
    /// Requested lifetime in whole seconds. Plugins clamp this to whatever
    /// window their provider allows; absence means the plugin default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
}

impl CredentialRequest {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ttl_secs: None,
        }
    }

    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }
}

/// Issued credential envelope handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Provider-defined payload, usually a JSON document. Opaque to the host.
    pub value: String,
    /// Absolute expiry reported by the provider. Authoritative; the plugin
    /// does no lifetime bookkeeping after issuance.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credential_envelope_serializes_rfc3339_expiry() {
        let expires_at = OffsetDateTime::from_unix_timestamp(1_767_323_045).unwrap();
        let credential = Credential {
            value: "{}".to_string(),
            expires_at,
            metadata: BTreeMap::from([("scope".to_string(), "aws".to_string())]),
        };

        let encoded = serde_json::to_value(&credential).unwrap();
        assert_eq!(
            encoded,
            json!({
                "value": "{}",
                "expires_at": "2026-01-02T03:04:05Z",
                "metadata": {"scope": "aws"},
            })
        );

        let decoded: Credential = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, credential);
    }

    #[test]
    fn empty_metadata_is_omitted() {
        let credential = Credential {
            value: "{}".to_string(),
            expires_at: OffsetDateTime::from_unix_timestamp(0).unwrap(),
            metadata: BTreeMap::new(),
        };

        let encoded = serde_json::to_value(&credential).unwrap();
        assert!(encoded.get("metadata").is_none());
    }

    #[test]
    fn request_ttl_defaults_to_absent() {
        let decoded: CredentialRequest = serde_json::from_value(json!({"scope": "aws"})).unwrap();
        assert_eq!(decoded, CredentialRequest::new("aws"));

        let encoded = serde_json::to_value(&decoded).unwrap();
        assert!(encoded.get("ttl_secs").is_none());

        let with_ttl: CredentialRequest =
            serde_json::from_value(json!({"scope": "aws", "ttl_secs": 7200})).unwrap();
        assert_eq!(with_ttl, CredentialRequest::new("aws").with_ttl(7200));
    }
}
