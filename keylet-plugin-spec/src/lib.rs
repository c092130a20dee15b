//! Contract between the keylet host and its credential broker plugins.
//!
//! A plugin exchanges a long-lived, narrowly scoped identity for short-lived
//! provider credentials on demand. The host owns transport, lifecycle, and
//! retries; this crate only defines the shapes both sides agree on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PluginError, PluginResult};
pub use traits::CredentialPlugin;
pub use types::{Credential, CredentialRequest, PluginInfo, ScopeSpec};

use std::sync::Arc;

pub type DynCredentialPlugin = Arc<dyn CredentialPlugin + Send + Sync>;
