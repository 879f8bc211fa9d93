//! Per-parse options.

use spodata_core::{CoercionPolicy, ODataConfig};

/// Options controlling a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// How coercion failures during hydration are handled.
    pub policy: CoercionPolicy,
}

impl ParseOptions {
    /// Strict binding: coercion failures abort the parse.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            policy: CoercionPolicy::Strict,
        }
    }

    /// Lenient binding: coercion failures are logged and the property skipped.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            policy: CoercionPolicy::Lenient,
        }
    }
}

impl From<&ODataConfig> for ParseOptions {
    fn from(config: &ODataConfig) -> Self {
        Self {
            policy: config.coercion_policy,
        }
    }
}
