use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Feed adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Operation timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum AdapterError {
    #[error("Feed source unavailable for board: {address}")]
    SourceUnavailable { address: String },

    #[error("Stats stream unavailable for board: {address}")]
    StatsUnavailable { address: String },

    #[error("Malformed record from board {address}: {details}")]
    MalformedRecord { address: String, details: String },

    #[error("Board not found: {address}")]
    BoardNotFound { address: String },

    #[error("Feed subscription closed")]
    SubscriptionClosed,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid board address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
