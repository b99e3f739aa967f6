use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "storefront/0.1 (fulfillment-client)";

/// Reads `.env` (if present) and then the `STOREFRONT_*` variables.
///
/// # Errors
///
/// Returns `ConfigError` when `STOREFRONT_API_BASE_URL` is unset or a
/// numeric variable does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// Returns `ConfigError` when `STOREFRONT_API_BASE_URL` is unset or a
/// numeric variable does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Assembles an [`AppConfig`] from an arbitrary variable source.
///
/// Blank values count as unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let get = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.trim().is_empty()) };

    let api_base_url = get("STOREFRONT_API_BASE_URL")
        .ok_or_else(|| ConfigError::MissingEnvVar("STOREFRONT_API_BASE_URL".to_string()))?;

    let env = get("STOREFRONT_ENV")
        .as_deref()
        .map_or(Environment::Development, parse_environment);
    let log_level = get("STOREFRONT_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
    let user_agent = get("STOREFRONT_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    let regions_path = get("STOREFRONT_REGIONS_PATH").map(PathBuf::from);

    let request_timeout_secs: u64 =
        parse_number("STOREFRONT_REQUEST_TIMEOUT_SECS", get("STOREFRONT_REQUEST_TIMEOUT_SECS"), 15)?;
    let reviews_page_size: u32 =
        parse_number("STOREFRONT_REVIEWS_PAGE_SIZE", get("STOREFRONT_REVIEWS_PAGE_SIZE"), 10)?;
    if reviews_page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_REVIEWS_PAGE_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        regions_path,
        reviews_page_size,
        user_id: get("STOREFRONT_USER_ID"),
        access_token: get("STOREFRONT_ACCESS_TOKEN"),
    })
}

fn parse_number<T>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{raw}': {e}"),
        }),
    }
}

/// Anything other than `production`/`prod` or `test` is development.
fn parse_environment(s: &str) -> Environment {
    match s.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
