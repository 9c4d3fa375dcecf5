use thiserror::Error;

/// Rejected consumer binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("invalid device {index}: must be an integer between 0 and {max}")]
    DeviceOutOfRange { index: i64, max: usize },

    #[error("invalid channel '{name}', must be one of: {valid}")]
    UnknownChannel { name: String, valid: String },
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
