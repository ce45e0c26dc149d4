use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::url::parse_http_url;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_http_url(&config.seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed, e)))?;

    if config.max_crawled_url < 1 {
        return Err(ConfigError::Validation(format!(
            "max_crawled_url must be >= 1, got {}",
            config.max_crawled_url
        )));
    }

    config.politeness_delay()?;

    if config.fetch_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout must be >= 1 second, got {}",
            config.fetch_timeout
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.crawled_path.is_empty() {
        return Err(ConfigError::Validation(
            "crawled_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
