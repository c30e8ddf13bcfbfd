use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let env = parse_environment(&or_default("CMSHIP_ENV", "development"))?;
    let log_level = or_default("CMSHIP_LOG_LEVEL", "info");
    let opencage_api_key = optional("OPENCAGE_API_KEY");
    let geocoder_base_url = or_default("CMSHIP_GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL);

    let geocoder_country_code = or_default("CMSHIP_GEOCODER_COUNTRY_CODE", "cm").to_lowercase();
    if geocoder_country_code.len() != 2
        || !geocoder_country_code.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "CMSHIP_GEOCODER_COUNTRY_CODE".to_string(),
            reason: format!("expected a two-letter country code, got '{geocoder_country_code}'"),
        });
    }

    // Present-but-empty disables the hint; absent falls back to the default.
    let geocoder_query_hint = match lookup("CMSHIP_GEOCODER_QUERY_HINT") {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v) => Some(v.trim().to_string()),
        Err(_) => Some("Cameroon".to_string()),
    };

    let geocoder_result_limit = parse_u32("CMSHIP_GEOCODER_RESULT_LIMIT", "5")?;
    if geocoder_result_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CMSHIP_GEOCODER_RESULT_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let geocoder_timeout_secs = parse_u64("CMSHIP_GEOCODER_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("CMSHIP_USER_AGENT", "cmship/0.1 (shipping-estimator)");
    let lookup_debounce_ms = parse_u64("CMSHIP_LOOKUP_DEBOUNCE_MS", "300")?;
    let rates_path = optional("CMSHIP_RATES_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        opencage_api_key,
        geocoder_base_url,
        geocoder_country_code,
        geocoder_query_hint,
        geocoder_result_limit,
        geocoder_timeout_secs,
        user_agent,
        lookup_debounce_ms,
        rates_path,
    })
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
        other => Err(ConfigError::InvalidEnvVar {
            var: "CMSHIP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
