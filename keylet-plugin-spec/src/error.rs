use thiserror::Error;

/// Result alias for plugin operations.
pub type PluginResult<T> = core::result::Result<T, PluginError>;

/// Canonical plugin error surface.
///
/// Every variant is terminal for the request that raised it; no error state
/// carries over to later calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("invalid config: {0}")]
    ConfigParse(String),
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("plugin not configured")]
    NotConfigured,
    #[error("unsupported scope: {0}")]
    Scope(String),
    #[error("exchange error: {0}")]
    Exchange(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl PluginError {
    /// True for the configuration error class (malformed payload or a
    /// missing required field).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            PluginError::ConfigParse(_) | PluginError::MissingField { .. }
        )
    }
}
