use async_trait::async_trait;
use keylet_plugin_spec::{PluginError, PluginResult};
use keylet_provider_aws_sts::{
    AwsBrokerConfig, CallerIdentity, SessionCredentials, SessionSpec, TokenExchange,
};
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};

/// One recorded AssumeRole invocation.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct MintCall {
    pub target_role: String,
    pub region: String,
    pub external_id: Option<String>,
    pub spec: SessionSpec,
}

/// Scripted stand-in for the live STS exchange. Records every call and
/// succeeds unless told to fail.
#[derive(Default)]
pub struct FakeExchange {
    mint_calls: Mutex<Vec<MintCall>>,
    introspect_calls: Mutex<usize>,
    mint_failure: Mutex<Option<String>>,
    introspect_failure: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl FakeExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_mint_with(&self, message: &str) {
        *self.mint_failure.lock() = Some(message.to_string());
    }

    pub fn fail_introspect_with(&self, message: &str) {
        *self.introspect_failure.lock() = Some(message.to_string());
    }

    pub fn mint_calls(&self) -> Vec<MintCall> {
        self.mint_calls.lock().clone()
    }

    pub fn introspect_calls(&self) -> usize {
        *self.introspect_calls.lock()
    }
}

#[async_trait]
impl TokenExchange for FakeExchange {
    async fn mint_session(
        &self,
        config: &AwsBrokerConfig,
        spec: &SessionSpec,
    ) -> PluginResult<SessionCredentials> {
        if let Some(message) = self.mint_failure.lock().clone() {
            return Err(PluginError::Exchange(message));
        }
        self.mint_calls.lock().push(MintCall {
            target_role: config.target_role.clone(),
            region: config.region.clone(),
            external_id: config.external_id().map(str::to_string),
            spec: spec.clone(),
        });
        Ok(SessionCredentials {
            access_key_id: "ASIAFAKESESSIONKEY00".to_string(),
            secret_access_key: "fake/session/secret".to_string(),
            session_token: "FwoGZXIvYXdzFAKEToken".to_string(),
            expires_at: OffsetDateTime::now_utc() + Duration::seconds(spec.duration_secs as i64),
        })
    }

    async fn introspect_identity(&self, _config: &AwsBrokerConfig) -> PluginResult<CallerIdentity> {
        if let Some(message) = self.introspect_failure.lock().clone() {
            return Err(PluginError::Exchange(message));
        }
        *self.introspect_calls.lock() += 1;
        Ok(CallerIdentity {
            account: Some("123456789012".to_string()),
            arn: Some("arn:aws:iam::123456789012:user/broker".to_string()),
        })
    }
}
