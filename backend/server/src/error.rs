#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed while loading the application configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Invalid log filtering directive: {0}")]
    LogDirectiveError(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to install the global log subscriber: {0}")]
    LoggerInitError(#[from] tracing_subscriber::util::TryInitError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
