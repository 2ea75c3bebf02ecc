//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Minimum length for a plausible browser user agent.
const MIN_USER_AGENT_LENGTH: usize = 40;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.network.user_agent)?;
    validate_timeouts(config)?;
    validate_delay_range(config)?;

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.is_empty() {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: "User agent must not be empty".to_string(),
        });
    }

    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    // Check for placeholder values
    let ua_lower = user_agent.to_lowercase();
    if ua_lower.contains("replaceme") || ua_lower.contains("your_user_agent") {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message:
                "User agent appears to be a placeholder. Please provide your browser's user agent."
                    .to_string(),
        });
    }

    Ok(())
}

fn validate_timeouts(config: &Config) -> Result<()> {
    if config.network.connect_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "connect_timeout_secs".to_string(),
            message: "Connect timeout must be greater than zero".to_string(),
        });
    }

    if config.network.request_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_secs".to_string(),
            message: "Request timeout must be greater than zero".to_string(),
        });
    }

    Ok(())
}

fn validate_delay_range(config: &Config) -> Result<()> {
    if config.options.download_delay_min_ms > config.options.download_delay_max_ms {
        return Err(Error::ConfigValidation {
            field: "download_delay_min_ms".to_string(),
            message: format!(
                "Delay lower bound ({} ms) exceeds upper bound ({} ms)",
                config.options.download_delay_min_ms, config.options.download_delay_max_ms
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_short_user_agent_rejected() {
        assert!(validate_user_agent("curl/8.0").is_err());
        assert!(validate_user_agent("").is_err());
    }

    #[test]
    fn test_placeholder_user_agent_rejected() {
        assert!(validate_user_agent(
            "REPLACEME_with_your_browser_user_agent_string_please"
        )
        .is_err());
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let mut config = Config::default();
        config.options.download_delay_min_ms = 800;
        config.options.download_delay_max_ms = 400;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.network.connect_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
