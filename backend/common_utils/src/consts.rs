//! Commonly used constants

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "CS";

/// Environment variable which selects the running environment
pub const RUN_ENV: &str = "RUN_ENV";

/// Content type of the plaintext replies expected by notification-driven gateways
pub const TEXT_PLAIN: &str = "text/plain";

/// Line separator of key-value reply bodies
pub const CRLF: &str = "\r\n";

/// Current environment
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Reads the environment from `RUN_ENV`, defaulting to development
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|env| env.parse().ok())
            .unwrap_or_default()
    }

    /// Configuration file name for this environment
    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
