use crate::app_config::{AnalyzerKind, AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a runnable
/// development config backed by `./pipeline.db`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = or_default("DATABASE_URL", "sqlite://pipeline.db");
    let env = parse_environment(&or_default("POSTPIPE_ENV", "development"));
    let bind_addr = parse_addr("POSTPIPE_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("POSTPIPE_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("POSTPIPE_DB_MAX_CONNECTIONS", "5")?;
    let db_acquire_timeout_secs = parse_u64("POSTPIPE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let posts_url = or_default(
        "POSTPIPE_POSTS_URL",
        "https://jsonplaceholder.typicode.com/posts",
    );
    let fetch_timeout_secs = parse_u64("POSTPIPE_FETCH_TIMEOUT_SECS", "5")?;
    let fetch_limit = parse_usize("POSTPIPE_FETCH_LIMIT", "3")?;
    let user_agent = or_default("POSTPIPE_USER_AGENT", "postpipe/0.1 (post-pipeline)");

    let analyzer = or_default("POSTPIPE_ANALYZER", "keyword")
        .parse::<AnalyzerKind>()
        .map_err(|reason| invalid("POSTPIPE_ANALYZER", reason))?;

    let notify_webhook_url = lookup("POSTPIPE_NOTIFY_WEBHOOK_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_acquire_timeout_secs,
        posts_url,
        fetch_timeout_secs,
        fetch_limit,
        user_agent,
        analyzer,
        notify_webhook_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
