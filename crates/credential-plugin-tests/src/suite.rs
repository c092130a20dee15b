use crate::{Capabilities, PluginUnderTest, without_field};
use anyhow::{Context, Result, bail, ensure};
use keylet_plugin_spec::{CredentialRequest, DynCredentialPlugin, PluginError};
use time::OffsetDateTime;

/// Runs the shared conformance suite against a plugin implementation.
pub struct ConformanceSuite<'a, P: PluginUnderTest> {
    plugin_name: String,
    under_test: &'a P,
    caps: Capabilities,
}

impl<'a, P: PluginUnderTest> ConformanceSuite<'a, P> {
    pub fn new(plugin_name: impl Into<String>, under_test: &'a P, caps: Capabilities) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            under_test,
            caps,
        }
    }

    pub async fn run(&self) -> Result<()> {
        self.check_identity().await?;
        self.check_catalog().await?;
        self.check_unconfigured_surface().await?;
        self.check_config_rejections().await?;
        self.check_configured_lifecycle().await?;
        Ok(())
    }

    async fn check_identity(&self) -> Result<()> {
        let plugin = self.plugin().await?;
        let info = plugin.info();
        ensure!(
            !info.name.is_empty(),
            "{}: info.name must not be empty",
            self.plugin_name
        );
        ensure!(
            !info.version.is_empty(),
            "{}: info.version must not be empty",
            self.plugin_name
        );
        Ok(())
    }

    async fn check_catalog(&self) -> Result<()> {
        let plugin = self.plugin().await?;
        let specs = plugin.scopes();
        ensure!(
            !specs.is_empty(),
            "{}: scope catalog must not be empty",
            self.plugin_name
        );
        for spec in &specs {
            ensure!(
                plugin.match_scope(&spec.pattern),
                "{}: cataloged pattern {} must match",
                self.plugin_name,
                spec.pattern
            );
        }
        ensure!(
            !plugin.match_scope("::no-plugin-serves-this::"),
            "{}: matcher must reject foreign scopes",
            self.plugin_name
        );
        Ok(())
    }

    async fn check_unconfigured_surface(&self) -> Result<()> {
        let plugin = self.plugin().await?;

        let request = CredentialRequest::new(self.under_test.grantable_scope());
        match plugin.get_credential(&request).await {
            Err(PluginError::NotConfigured) => {}
            Ok(_) => bail!(
                "{}: get_credential before configure must fail, got a credential",
                self.plugin_name
            ),
            Err(other) => bail!(
                "{}: get_credential before configure must fail NotConfigured, got {other}",
                self.plugin_name
            ),
        }

        match plugin.validate().await {
            Err(PluginError::NotConfigured) => {}
            Ok(()) => bail!(
                "{}: validate before configure must fail, yet it passed",
                self.plugin_name
            ),
            Err(other) => bail!(
                "{}: validate before configure must fail NotConfigured, got {other}",
                self.plugin_name
            ),
        }

        plugin
            .revoke_credential("never-issued")
            .await
            .with_context(|| format!("{}: revoke must succeed unconfigured", self.plugin_name))?;
        Ok(())
    }

    async fn check_config_rejections(&self) -> Result<()> {
        for field in self.under_test.required_fields() {
            let plugin = self.plugin().await?;
            let payload = without_field(&self.under_test.valid_config(), field);
            match plugin.configure(payload) {
                Err(err) if err.is_config() => {}
                Ok(()) => bail!(
                    "{}: configure must reject a payload without {field}",
                    self.plugin_name
                ),
                Err(other) => bail!(
                    "{}: expected a config error without {field}, got {other}",
                    self.plugin_name
                ),
            }
        }
        Ok(())
    }

    async fn check_configured_lifecycle(&self) -> Result<()> {
        let plugin = self.plugin().await?;
        let config = self.under_test.valid_config();

        plugin.configure(config.clone()).with_context(|| {
            format!("{}: configure rejected the valid payload", self.plugin_name)
        })?;
        plugin.configure(config).with_context(|| {
            format!(
                "{}: reconfigure with the same payload must succeed",
                self.plugin_name
            )
        })?;

        if self.caps.mint {
            let scope = self.under_test.grantable_scope();
            let credential = plugin
                .get_credential(&CredentialRequest::new(scope.clone()))
                .await
                .with_context(|| format!("{}: mint failed for {scope}", self.plugin_name))?;
            ensure!(
                !credential.value.is_empty(),
                "{}: credential value must not be empty",
                self.plugin_name
            );
            ensure!(
                credential.expires_at > OffsetDateTime::now_utc(),
                "{}: credential must expire in the future",
                self.plugin_name
            );
        }

        plugin
            .revoke_credential("already-expired")
            .await
            .with_context(|| {
                format!("{}: revoke must succeed after configure", self.plugin_name)
            })?;
        Ok(())
    }

    async fn plugin(&self) -> Result<DynCredentialPlugin> {
        self.under_test
            .fresh()
            .await
            .with_context(|| format!("{}: harness failed to build a plugin", self.plugin_name))
    }
}
