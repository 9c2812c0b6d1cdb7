use super::{
    types::{AuthMethod, Config},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Basic auth has credentials configured
/// - Ticketing connection parameters are non-empty
/// - SMTP section, when present, is complete
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Auth validation
    if config.auth.method == AuthMethod::Basic {
        let username_ok = config
            .auth
            .username
            .as_ref()
            .is_some_and(|u| !u.is_empty());
        let password_ok = config
            .auth
            .password
            .as_ref()
            .is_some_and(|p| !p.is_empty());
        if !username_ok || !password_ok {
            return Err(ConfigError::ValidationError(
                "auth.username and auth.password are required for basic auth".to_string(),
            ));
        }
    }

    // Ticketing validation
    if config.ticketing.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "ticketing.base_url cannot be empty".to_string(),
        ));
    }
    if config.ticketing.api_token.is_empty() {
        return Err(ConfigError::ValidationError(
            "ticketing.api_token cannot be empty".to_string(),
        ));
    }
    if config.ticketing.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "ticketing.timeout_secs cannot be 0".to_string(),
        ));
    }

    // SMTP validation (optional section, but complete when present)
    if let Some(smtp) = &config.smtp {
        if smtp.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "smtp.host cannot be empty".to_string(),
            ));
        }
        if smtp.from.is_empty() {
            return Err(ConfigError::ValidationError(
                "smtp.from cannot be empty".to_string(),
            ));
        }
        if smtp.recipients.is_empty() || smtp.recipients.iter().any(|r| r.is_empty()) {
            return Err(ConfigError::ValidationError(
                "smtp.recipients must contain at least one non-empty address".to_string(),
            ));
        }
    }

    // Dispatcher validation
    if config.dispatcher.workers == 0 {
        return Err(ConfigError::ValidationError(
            "dispatcher.workers cannot be 0".to_string(),
        ));
    }
    if config.dispatcher.queue_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "dispatcher.queue_capacity cannot be 0".to_string(),
        ));
    }

    Ok(())
}
