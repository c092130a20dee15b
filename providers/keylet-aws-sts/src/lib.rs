//! AWS STS credential broker plugin.
//!
//! Exchanges a long-lived broker identity for short-lived session
//! credentials via STS `AssumeRole` and hands them to the host in the
//! standard credential envelope. Stateless apart from the configuration
//! slot: every request is one provider round trip, nothing is cached or
//! retried, and issued sessions are not tracked.

mod config;
mod scope;
mod session;
mod sts;

pub use config::AwsBrokerConfig;
pub use scope::NAMESPACE;
pub use session::SessionSpec;
pub use sts::{CallerIdentity, SessionCredentials, StsExchange, TokenExchange};

use async_trait::async_trait;
use keylet_plugin_spec::{
    Credential, CredentialPlugin, CredentialRequest, PluginError, PluginInfo, PluginResult,
    ScopeSpec,
};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

const PLUGIN_NAME: &str = "aws";
const PLUGIN_DESCRIPTION: &str = "AWS STS temporary credentials via AssumeRole";
const MIN_HOST_VERSION: &str = "0.4.0";

/// Wire shape of the credential value handed to the host.
#[derive(Serialize)]
struct SessionValue<'a> {
    access_key_id: &'a str,
    secret_access_key: &'a str,
    session_token: &'a str,
    region: &'a str,
}

/// Credential broker plugin backed by AWS STS.
pub struct AwsStsPlugin {
    config: RwLock<Option<Arc<AwsBrokerConfig>>>,
    exchange: Arc<dyn TokenExchange>,
}

impl AwsStsPlugin {
    /// Plugin wired to the live STS exchange.
    pub fn new() -> Self {
        Self::with_exchange(Arc::new(StsExchange::new()))
    }

    /// Plugin with a custom exchange. Tests use this to substitute a fake.
    pub fn with_exchange(exchange: Arc<dyn TokenExchange>) -> Self {
        Self {
            config: RwLock::new(None),
            exchange,
        }
    }

    fn current_config(&self) -> PluginResult<Arc<AwsBrokerConfig>> {
        self.config.read().clone().ok_or(PluginError::NotConfigured)
    }
}

impl Default for AwsStsPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialPlugin for AwsStsPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: PLUGIN_DESCRIPTION.to_string(),
            min_host_version: MIN_HOST_VERSION.to_string(),
        }
    }

    fn scopes(&self) -> Vec<ScopeSpec> {
        scope::scope_specs()
    }

    fn configure(&self, payload: Value) -> PluginResult<()> {
        let config = AwsBrokerConfig::from_value(payload)?;
        info!(
            region = %config.region,
            target_role = %config.target_role,
            "aws plugin configured"
        );
        *self.config.write() = Some(Arc::new(config));
        Ok(())
    }

    fn match_scope(&self, scope: &str) -> bool {
        scope::matches_namespace(scope)
    }

    async fn validate(&self) -> PluginResult<()> {
        let config = self.current_config()?;
        match self.exchange.introspect_identity(&config).await {
            Ok(identity) => {
                debug!(
                    arn = identity.arn.as_deref().unwrap_or("unknown"),
                    "aws identity check passed"
                );
                Ok(())
            }
            Err(PluginError::Exchange(message)) => {
                warn!(%message, "aws identity check failed");
                Err(PluginError::Validation(message))
            }
            Err(err) => Err(err),
        }
    }

    async fn get_credential(&self, request: &CredentialRequest) -> PluginResult<Credential> {
        let config = self.current_config()?;
        if !scope::matches_namespace(&request.scope) {
            return Err(PluginError::Scope(request.scope.clone()));
        }

        let spec = SessionSpec::for_request(
            &request.scope,
            request.ttl_secs,
            OffsetDateTime::now_utc(),
        );
        debug!(
            scope = %request.scope,
            duration_secs = spec.duration_secs,
            "minting aws session"
        );

        let session = match self.exchange.mint_session(&config, &spec).await {
            Ok(session) => session,
            Err(err) => {
                warn!(scope = %request.scope, %err, "aws session mint failed");
                return Err(err);
            }
        };

        let value = serde_json::to_string(&SessionValue {
            access_key_id: &session.access_key_id,
            secret_access_key: &session.secret_access_key,
            session_token: &session.session_token,
            region: &config.region,
        })
        .map_err(|err| PluginError::Exchange(format!("encode credential value: {err}")))?;

        let metadata = BTreeMap::from([
            ("role_arn".to_string(), config.target_role.clone()),
            ("region".to_string(), config.region.clone()),
            ("scope".to_string(), request.scope.clone()),
        ]);

        info!(
            scope = %request.scope,
            expires_at = %session.expires_at,
            "issued aws session credentials"
        );

        Ok(Credential {
            value,
            expires_at: session.expires_at,
            metadata,
        })
    }

    async fn revoke_credential(&self, _credential_id: &str) -> PluginResult<()> {
        // STS session tokens cannot be revoked; they lapse on their own.
        Ok(())
    }
}
