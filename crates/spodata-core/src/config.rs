//! Configuration management for the binder.
//!
//! All configuration is driven by environment variables.

use crate::error::{CoreError, CoreResult};
use crate::types::CoercionPolicy;

/// Global configuration for the OData binder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ODataConfig {
    /// Log level.
    pub log_level: String,
    /// How strictly parsed values are coerced onto native fields.
    pub coercion_policy: CoercionPolicy,
}

impl Default for ODataConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            coercion_policy: CoercionPolicy::default(),
        }
    }
}

impl ODataConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns an error if `ODATA_COERCION_POLICY` names an unknown policy or
    /// `LOG_LEVEL` is set but blank.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            if v.trim().is_empty() {
                return Err(CoreError::Config("LOG_LEVEL must not be blank".to_owned()));
            }
            config.log_level = v;
        }
        if let Some(v) = lookup("ODATA_COERCION_POLICY") {
            config.coercion_policy = v.parse()?;
        }

        tracing::debug!(
            log_level = %config.log_level,
            coercion_policy = %config.coercion_policy,
            "loaded binder configuration"
        );

        Ok(config)
    }
}
