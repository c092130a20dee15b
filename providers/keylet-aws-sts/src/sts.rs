use crate::config::AwsBrokerConfig;
use crate::session::SessionSpec;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_sts::Client as StsClient;
use aws_sdk_sts::config::BehaviorVersion;
use aws_sdk_sts::error::{ProvideErrorMetadata, SdkError};
use aws_types::region::Region;
use keylet_plugin_spec::{PluginError, PluginResult};
use std::env;
use time::OffsetDateTime;

const STS_ENDPOINT_ENV: &str = "KEYLET_AWS_STS_ENDPOINT";
const CREDENTIALS_PROVIDER_NAME: &str = "keylet-broker-config";

/// Temporary session triple returned by a token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expires_at: OffsetDateTime,
}

/// Identity the provider reports for the configured broker credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
}

/// The two provider calls the plugin needs, kept narrow so tests can swap in
/// a recording fake.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// One AssumeRole exchange against the configured target role.
    async fn mint_session(
        &self,
        config: &AwsBrokerConfig,
        spec: &SessionSpec,
    ) -> PluginResult<SessionCredentials>;

    /// One GetCallerIdentity call with the configured identity.
    async fn introspect_identity(&self, config: &AwsBrokerConfig) -> PluginResult<CallerIdentity>;
}

/// Live STS-backed exchange.
#[derive(Debug, Clone, Default)]
pub struct StsExchange;

impl StsExchange {
    pub fn new() -> Self {
        Self
    }

    /// Build a client from the configured identity only; the ambient AWS
    /// credential chain is never consulted, even when it would work.
    fn client(&self, config: &AwsBrokerConfig) -> StsClient {
        let credentials = Credentials::new(
            config.identity_id.clone(),
            config.identity_secret.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );
        let mut builder = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = env::var(STS_ENDPOINT_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            builder = builder.endpoint_url(endpoint);
        }
        StsClient::from_conf(builder.build())
    }
}

#[async_trait]
impl TokenExchange for StsExchange {
    async fn mint_session(
        &self,
        config: &AwsBrokerConfig,
        spec: &SessionSpec,
    ) -> PluginResult<SessionCredentials> {
        let client = self.client(config);
        let mut request = client
            .assume_role()
            .role_arn(&config.target_role)
            .role_session_name(&spec.session_name)
            .duration_seconds(spec.duration_secs as i32);
        if let Some(external_id) = config.external_id() {
            request = request.external_id(external_id);
        }

        let output = match request.send().await {
            Ok(output) => output,
            Err(err) => return Err(exchange_error("assume_role", &err)),
        };

        let credentials = output
            .credentials()
            .ok_or_else(|| PluginError::Exchange("assume_role returned no credentials".into()))?;

        Ok(SessionCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expires_at: expiry_from(credentials.expiration())?,
        })
    }

    async fn introspect_identity(&self, config: &AwsBrokerConfig) -> PluginResult<CallerIdentity> {
        let client = self.client(config);
        match client.get_caller_identity().send().await {
            Ok(output) => Ok(CallerIdentity {
                account: output.account().map(str::to_string),
                arn: output.arn().map(str::to_string),
            }),
            Err(err) => Err(exchange_error("get_caller_identity", &err)),
        }
    }
}

fn expiry_from(expiration: &aws_smithy_types::DateTime) -> PluginResult<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(expiration.as_nanos()).map_err(|err| {
        PluginError::Exchange(format!("assume_role returned invalid expiration: {err}"))
    })
}

fn exchange_error<E>(operation: &str, err: &SdkError<E>) -> PluginError
where
    E: ProvideErrorMetadata,
{
    if let SdkError::ServiceError(context) = err {
        let service_err = context.err();
        let code = service_err.code().unwrap_or("unknown");
        let message = service_err.message().unwrap_or("no detail");
        return PluginError::Exchange(format!("{operation} failed: {code}: {message}"));
    }
    PluginError::Exchange(format!("{operation} failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_conversion_preserves_the_provider_instant() {
        let provider_expiry = aws_smithy_types::DateTime::from_secs(1_767_323_045);
        let expiry = expiry_from(&provider_expiry).unwrap();
        assert_eq!(expiry.unix_timestamp(), 1_767_323_045);
    }
}
