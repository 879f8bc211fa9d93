//! spodata-inspect - bind a SharePoint OData Atom response and report the result.
//!
//! Reads an Atom document from a file, binds it against the built-in
//! SharePoint types and logs the root value.
//!
//! # Usage
//!
//! ```text
//! spodata-inspect response.xml [content-type]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ODATA_COERCION_POLICY` | `strict` | `strict` or `lenient` binding of mismatched values |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result, bail};
use spodata_atom::{ParseOptions, parse};
use spodata_core::ODataConfig;
use spodata_model::{EntityObject, Value, sharepoint};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

fn report_entity(position: Option<usize>, entity: &dyn EntityObject) {
    let metadata = entity.metadata();
    info!(
        position = ?position,
        wire_type = %entity.type_name(),
        id = metadata.id.as_deref().unwrap_or("-"),
        uri = metadata.uri.as_deref().unwrap_or("-"),
        "entity"
    );
    tracing::debug!(entity = ?entity, "entity fields");
}

fn main() -> Result<()> {
    let config = ODataConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;
    info!(
        log_level = %config.log_level,
        coercion_policy = %config.coercion_policy,
        "loaded configuration"
    );

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: spodata-inspect <file> [content-type]");
    };
    let content_type = args.next();

    let bytes = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;
    let document = parse(
        &bytes,
        content_type.as_deref(),
        sharepoint::registry(),
        ParseOptions::from(&config),
    )
    .with_context(|| format!("failed to bind {path}"))?;

    match document.into_value() {
        None => info!(path = %path, "document holds no value"),
        Some(Value::Entity(entity)) => report_entity(None, entity.as_ref()),
        Some(Value::Collection(collection)) => {
            info!(path = %path, entities = collection.len(), "entity collection");
            for (i, entity) in collection.iter().enumerate() {
                report_entity(Some(i), entity.as_ref());
            }
        }
        Some(Value::Scalar(property)) => {
            info!(
                name = %property.name,
                kind = %property.kind(),
                value = %property.value,
                "scalar property"
            );
        }
        Some(Value::Complex(complex)) => {
            info!(wire_type = %complex.type_name(), value = ?complex, "complex value");
        }
    }

    Ok(())
}
