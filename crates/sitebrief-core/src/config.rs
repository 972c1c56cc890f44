use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Desktop-browser `User-Agent` sent with page fetches unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let google_api_key = require("GOOGLE_API_KEY")?;
    let tavily_api_key = require("TAVILY_API_KEY")?;

    let env = parse_environment(&or_default("SITEBRIEF_ENV", "development"))?;
    let log_level = or_default("SITEBRIEF_LOG_LEVEL", "info");

    let fetch_timeout_secs = parse_u64("SITEBRIEF_FETCH_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("SITEBRIEF_USER_AGENT", DEFAULT_USER_AGENT);
    let about_text_max_chars = parse_usize("SITEBRIEF_ABOUT_TEXT_MAX_CHARS", "4000")?;
    if about_text_max_chars == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SITEBRIEF_ABOUT_TEXT_MAX_CHARS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let gemini_model = or_default("SITEBRIEF_GEMINI_MODEL", "gemini-2.0-flash");
    let gemini_timeout_secs = parse_u64("SITEBRIEF_GEMINI_TIMEOUT_SECS", "60")?;
    let search_max_results = parse_usize("SITEBRIEF_SEARCH_MAX_RESULTS", "3")?;
    let search_timeout_secs = parse_u64("SITEBRIEF_SEARCH_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        log_level,
        google_api_key,
        tavily_api_key,
        fetch_timeout_secs,
        user_agent,
        about_text_max_chars,
        gemini_model,
        gemini_timeout_secs,
        search_max_results,
        search_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SITEBRIEF_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
