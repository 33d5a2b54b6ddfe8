use super::{
    types::{AuthMethod, Config},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Auth section exists (enforced by serde)
/// - Server port is not 0
/// - api_key auth has a non-empty key
/// - Configured catalog backends have non-empty API keys
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Auth validation
    if matches!(config.auth.method, AuthMethod::ApiKey)
        && config.auth.api_key.as_ref().is_none_or(|k| k.is_empty())
    {
        return Err(ConfigError::ValidationError(
            "auth.api_key is required when auth.method is \"api_key\"".to_string(),
        ));
    }

    // Catalog validation: a section with an empty key would boot a server
    // that fails every search, so reject it up front.
    if let Some(ref catalogs) = config.catalogs {
        if catalogs
            .google_books
            .as_ref()
            .is_some_and(|c| c.api_key.is_empty())
        {
            return Err(ConfigError::ValidationError(
                "catalogs.google_books.api_key cannot be empty".to_string(),
            ));
        }
        if catalogs.nyt.as_ref().is_some_and(|c| c.api_key.is_empty()) {
            return Err(ConfigError::ValidationError(
                "catalogs.nyt.api_key cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
