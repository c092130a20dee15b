use anyhow::Result;
use async_trait::async_trait;
use keylet_plugin_spec::DynCredentialPlugin;
use serde_json::Value;

/// How the suite obtains plugin instances and the payloads to drive them.
#[async_trait]
pub trait PluginUnderTest: Send + Sync {
    /// Fresh, unconfigured plugin instance.
    async fn fresh(&self) -> Result<DynCredentialPlugin>;

    /// Configuration payload the plugin accepts.
    fn valid_config(&self) -> Value;

    /// A scope the plugin serves, used for mint checks.
    fn grantable_scope(&self) -> String;

    /// Top-level config fields whose absence must be rejected.
    fn required_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }
}
