use std::env::VarError;
use std::fmt;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const BASE_URL_VAR: &str = "HERBCAT_API_BASE_URL";
const DEFAULT_USER_AGENT: &str = "herbcat/0.1 (catalog-client)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation only; tests drive it with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let text_or = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let api_base_url = lookup(BASE_URL_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(BASE_URL_VAR.to_string()))?;
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            BASE_URL_VAR,
            format!("expected an http(s) URL, got '{api_base_url}'"),
        ));
    }

    let preview_limit: usize = parse_or(&lookup, "HERBCAT_PREVIEW_LIMIT", 4)?;
    if preview_limit == 0 {
        return Err(invalid("HERBCAT_PREVIEW_LIMIT", "must be at least 1".to_string()));
    }

    Ok(AppConfig {
        api_base_url,
        api_token: lookup("HERBCAT_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty()),
        env: parse_environment(&text_or("HERBCAT_ENV", "development"))?,
        log_level: text_or("HERBCAT_LOG_LEVEL", "info"),
        request_timeout_secs: parse_or(&lookup, "HERBCAT_REQUEST_TIMEOUT_SECS", 30)?,
        user_agent: text_or("HERBCAT_USER_AGENT", DEFAULT_USER_AGENT),
        max_retries: parse_or(&lookup, "HERBCAT_MAX_RETRIES", 3)?,
        retry_backoff_base_secs: parse_or(&lookup, "HERBCAT_RETRY_BACKOFF_BASE_SECS", 1)?,
        preview_limit,
    })
}

fn invalid(var: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    }
}

/// Parses `var` as `T`, or returns `default` when it is unset.
fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| invalid(var, e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid("HERBCAT_ENV", format!("unknown environment '{other}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
