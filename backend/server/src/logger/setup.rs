//! Setup logging subsystem.

use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use super::config::{Log, LogFormat};
use crate::error::ConfigurationError;

/// Installs the global subscriber described by the console log config.
///
/// Fails if a global subscriber has already been installed.
pub fn setup(config: &Log) -> Result<(), ConfigurationError> {
    let console = &config.console;
    if !console.enabled {
        return Ok(());
    }

    let filter = match console.filtering_directive.as_deref() {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::default()
            .add_directive(LevelFilter::from_level(console.level.into_level()).into()),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match console.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Default => registry.with(fmt::layer().pretty()).try_init()?,
    }

    Ok(())
}
