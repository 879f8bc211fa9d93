//! Core types and configuration for the SharePoint OData binder.
//!
//! This crate holds the pieces shared by the model, the Atom binder and the
//! inspection binary: environment-driven configuration, the coercion policy
//! that governs how strictly parsed values are bound onto native fields, and
//! the core error type.

mod config;
mod error;
mod types;

pub use config::ODataConfig;
pub use error::{CoreError, CoreResult};
pub use types::CoercionPolicy;
