//! Configuration validation

use crate::config::Config;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Rejects configurations the orchestrator cannot run with
pub fn validate(config: &Config) -> ConfigResult<()> {
    let base = Url::parse(&config.platform.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", config.platform.base_url)))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http(s), got {}",
            base.scheme()
        )));
    }

    if config.fetch.max_retries == 0 {
        return Err(ConfigError::Validation(
            "max-retries must be at least 1".to_string(),
        ));
    }

    if config.fetch.per_scroll_yield == 0 {
        return Err(ConfigError::Validation(
            "per-scroll-yield must be at least 1".to_string(),
        ));
    }

    if config.fetch.navigation_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "navigation-timeout-ms must be positive".to_string(),
        ));
    }

    if config.session.viewport_width == 0 || config.session.viewport_height == 0 {
        return Err(ConfigError::Validation(
            "viewport dimensions must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_bad_base_url() {
        let mut config = Config::default();
        config.platform.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.platform.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_retries_rejected() {
        let mut config = Config::default();
        config.fetch.max_retries = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let mut config = Config::default();
        config.session.viewport_height = 0;
        assert!(validate(&config).is_err());
    }
}
