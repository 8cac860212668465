use plebhome_core::{AdapterError, ConfigError, CoreError, ErrorExt};

#[test]
fn test_error_codes() {
    let adapter_error = CoreError::Adapter(AdapterError::SubscriptionClosed);
    assert_eq!(adapter_error.error_code(), "ADAPTER");

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "digest_size".to_string(),
        value: "0".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let timeout_error = CoreError::Timeout { seconds: 30 };
    assert_eq!(timeout_error.error_code(), "TIMEOUT");
}

#[test]
fn test_recoverable_errors() {
    let recoverable = CoreError::Adapter(AdapterError::SourceUnavailable {
        address: "business-and-finance.eth".to_string(),
    });
    assert!(recoverable.is_recoverable());

    let recoverable = CoreError::Adapter(AdapterError::MalformedRecord {
        address: "memes.eth".to_string(),
        details: "missing cid".to_string(),
    });
    assert!(recoverable.is_recoverable());

    let not_recoverable = CoreError::InvalidInput {
        message: "empty board list".to_string(),
    };
    assert!(!not_recoverable.is_recoverable());
}

#[test]
fn test_user_friendly_messages() {
    let err = CoreError::Adapter(AdapterError::SourceUnavailable {
        address: "memes.eth".to_string(),
    });
    let message = err.user_friendly_message();
    assert!(!message.is_empty());
    assert!(message.contains("memes.eth"));

    let err = CoreError::Config(ConfigError::InvalidAddress {
        address: "a/b".to_string(),
        reason: "contains a path separator".to_string(),
    });
    let message = err.user_friendly_message();
    assert!(message.contains("a/b"));
    assert!(message.contains("path separator"));
}

#[test]
fn test_error_conversion_into_core() {
    fn fails() -> Result<(), CoreError> {
        Err(AdapterError::SubscriptionClosed)?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, CoreError::Adapter(_)));
}
