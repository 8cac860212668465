use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_recoverable(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Adapter(e) => {
                error!("Feed adapter error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Adapter failures degrade to fewer items or stale counters,
            // never to a crash.
            CoreError::Adapter(_) => true,
            // A rejected board address is re-prompted, everything else in
            // the config taxonomy needs operator attention.
            CoreError::Config(e) => matches!(e, ConfigError::InvalidAddress { .. }),
            CoreError::Timeout { .. } => true,
            CoreError::Io(_)
            | CoreError::Serialization(_)
            | CoreError::InvalidInput { .. }
            | CoreError::Internal { .. } => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Adapter(AdapterError::SourceUnavailable { address }) => {
                format!("Board {address} is not responding. It will be skipped for now.")
            }
            CoreError::Adapter(AdapterError::StatsUnavailable { address }) => {
                format!("Activity counters for {address} are unavailable. Totals may be stale.")
            }
            CoreError::Adapter(AdapterError::BoardNotFound { address }) => {
                format!("Board {address} could not be found.")
            }
            CoreError::Adapter(_) => "A feed source reported an error. Some posts may be missing."
                .to_string(),
            CoreError::Config(ConfigError::InvalidAddress { address, reason }) => {
                format!("\"{address}\" is not a valid board address: {reason}")
            }
            CoreError::Config(_) => "There is a problem with the configuration.".to_string(),
            CoreError::Timeout { seconds } => {
                format!("The operation timed out after {seconds} seconds.")
            }
            _ => "An unexpected error occurred.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Adapter(_) => "ADAPTER",
            CoreError::Config(_) => "CONFIG",
            CoreError::Io(_) => "IO",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::Timeout { .. } => "TIMEOUT",
            CoreError::Internal { .. } => "INTERNAL",
        }
        .to_string()
    }
}
