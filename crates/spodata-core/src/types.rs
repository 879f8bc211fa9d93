//! Shared value types.

use std::fmt;
use std::str::FromStr;

/// How hydration treats a parsed value that cannot be coerced onto the
/// native field it names.
///
/// A navigation-shaped link bound to a non-navigation field is always fatal;
/// the policy only governs scalar/complex coercion and inline entity types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Surface every mismatch as a binding error.
    #[default]
    Strict,
    /// Log the mismatch and leave the field untouched.
    Lenient,
}

impl CoercionPolicy {
    /// Returns the configuration spelling of this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// Whether mismatches should be raised rather than skipped.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for CoercionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoercionPolicy {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("strict") => Ok(Self::Strict),
            v if v.eq_ignore_ascii_case("lenient") => Ok(Self::Lenient),
            other => Err(crate::CoreError::InvalidCoercionPolicy(other.to_owned())),
        }
    }
}
