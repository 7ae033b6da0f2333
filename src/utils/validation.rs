//! Input validation and sanitization utilities
//!
//! Checks that run on user input before anything touches the network.

use crate::error::{CliError, ValidationError};

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Digits only, at least 1. Signs, decimals and overflow are rejected.
pub fn parse_positive(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().filter(|n| *n >= 1)
}

/// Parse the record limit typed by the user and check it against `max`
pub fn validate_limit(input: &str, max: u32) -> Result<u32, ValidationError> {
    let limit = parse_positive(input).ok_or_else(|| ValidationError::InvalidLimit {
        value: input.to_string(),
    })?;

    if limit > max {
        return Err(ValidationError::LimitTooLarge { limit, max });
    }

    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("https://api.example.com/api/v1").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:3000").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_limit_accepts_positive() {
        assert_eq!(validate_limit("1", 100), Ok(1));
        assert_eq!(validate_limit("100", 100), Ok(100));
        assert_eq!(validate_limit(" 42 ", 100), Ok(42));
    }

    #[test]
    fn test_validate_limit_rejects_non_positive() {
        for input in ["0", "-5", "abc", "", "1.5", "+3", "99999999999"] {
            assert_eq!(
                validate_limit(input, 100),
                Err(ValidationError::InvalidLimit {
                    value: input.to_string()
                }),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_validate_limit_above_max() {
        assert_eq!(
            validate_limit("101", 100),
            Err(ValidationError::LimitTooLarge { limit: 101, max: 100 })
        );
    }
}
