//! Board address helpers.
//!
//! Addresses are either DNS-like names ("business-and-finance.eth") or raw
//! peer ids ("12D3KooW..."). Manual entry is validated syntactically here;
//! a rejected address is a recoverable error, the caller re-prompts.

use plebhome_core::ConfigError;

/// Syntactic validation for a manually entered board address.
pub fn validate_address(address: &str) -> Result<(), ConfigError> {
    if address.is_empty() {
        return Err(ConfigError::InvalidAddress {
            address: address.to_string(),
            reason: "address is empty".to_string(),
        });
    }
    if address.contains('/') || address.contains('\\') {
        return Err(ConfigError::InvalidAddress {
            address: address.to_string(),
            reason: "contains a path separator".to_string(),
        });
    }
    if address.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidAddress {
            address: address.to_string(),
            reason: "contains whitespace".to_string(),
        });
    }
    Ok(())
}

/// Display form of an address: DNS-like names are kept whole, raw peer ids
/// are abbreviated to their first ten characters.
pub fn short_address(address: &str) -> String {
    if address.contains('.') {
        address.to_string()
    } else {
        let prefix: String = address.chars().take(10).collect();
        if prefix.len() < address.len() {
            format!("{prefix}...")
        } else {
            prefix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(validate_address("business-and-finance.eth").is_ok());
        assert!(validate_address("12D3KooWAbCdEfGh").is_ok());
        assert!(validate_address("board.sol").is_ok());
    }

    #[test]
    fn test_rejects_separators_and_whitespace() {
        assert!(validate_address("a/b").is_err());
        assert!(validate_address("a\\b").is_err());
        assert!(validate_address("has space").is_err());
        assert!(validate_address("tab\there").is_err());
        assert!(validate_address("").is_err());
    }

    #[test]
    fn test_short_address_keeps_dns_names() {
        assert_eq!(
            short_address("business-and-finance.eth"),
            "business-and-finance.eth"
        );
    }

    #[test]
    fn test_short_address_abbreviates_peer_ids() {
        assert_eq!(
            short_address("12D3KooWAbCdEfGhIjKl"),
            "12D3KooWAb..."
        );
        // Short ids are kept whole, no trailing ellipsis.
        assert_eq!(short_address("12D3KooW"), "12D3KooW");
    }
}
