use crate::error::PluginResult;
use crate::types::{Credential, CredentialRequest, PluginInfo, ScopeSpec};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Contract implemented by credential broker plugins.
///
/// Methods that reach the provider's network API are async; the rest are
/// local computations. `configure` must be called before `validate` or
/// `get_credential`; the other operations work on an unconfigured plugin.
#[async_trait]
pub trait CredentialPlugin: Send + Sync {
    /// Static identity card for the host registry.
    fn info(&self) -> PluginInfo;

    /// Descriptive catalog of the scope patterns this plugin serves.
    fn scopes(&self) -> Vec<ScopeSpec>;

    /// Accept a configuration payload. May be called again to replace the
    /// configuration; a rejected payload leaves the previous one in place.
    fn configure(&self, config: Value) -> PluginResult<()>;

    /// Whether the given scope belongs to this plugin's namespace.
    fn match_scope(&self, scope: &str) -> bool;

    /// Check the configured identity against the provider without minting.
    async fn validate(&self) -> PluginResult<()>;

    /// Exchange the configured identity for a short-lived credential.
    async fn get_credential(&self, request: &CredentialRequest) -> PluginResult<Credential>;

    /// Revoke a previously issued credential. Plugins whose provider cannot
    /// revoke treat this as a successful no-op.
    async fn revoke_credential(&self, credential_id: &str) -> PluginResult<()>;
}

#[async_trait]
impl<T> CredentialPlugin for Arc<T>
where
    T: CredentialPlugin + ?Sized,
{
    fn info(&self) -> PluginInfo {
        (**self).info()
    }

    fn scopes(&self) -> Vec<ScopeSpec> {
        (**self).scopes()
    }

    fn configure(&self, config: Value) -> PluginResult<()> {
        (**self).configure(config)
    }

    fn match_scope(&self, scope: &str) -> bool {
        (**self).match_scope(scope)
    }

    async fn validate(&self) -> PluginResult<()> {
        (**self).validate().await
    }

    async fn get_credential(&self, request: &CredentialRequest) -> PluginResult<Credential> {
        (**self).get_credential(request).await
    }

    async fn revoke_credential(&self, credential_id: &str) -> PluginResult<()> {
        (**self).revoke_credential(credential_id).await
    }
}

#[async_trait]
impl<T> CredentialPlugin for Box<T>
where
    T: CredentialPlugin + ?Sized,
{
    fn info(&self) -> PluginInfo {
        (**self).info()
    }

    fn scopes(&self) -> Vec<ScopeSpec> {
        (**self).scopes()
    }

    fn configure(&self, config: Value) -> PluginResult<()> {
        (**self).configure(config)
    }

    fn match_scope(&self, scope: &str) -> bool {
        (**self).match_scope(scope)
    }

    async fn validate(&self) -> PluginResult<()> {
        (**self).validate().await
    }

    async fn get_credential(&self, request: &CredentialRequest) -> PluginResult<Credential> {
        (**self).get_credential(request).await
    }

    async fn revoke_credential(&self, credential_id: &str) -> PluginResult<()> {
        (**self).revoke_credential(credential_id).await
    }
}
