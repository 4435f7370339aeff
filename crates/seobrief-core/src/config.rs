use crate::app_config::{AppConfig, DEFAULT_SEMRUSH_BASE_URL, DEFAULT_SERPER_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric value cannot be parsed.
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
/// Returns `ConfigError` if a numeric value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank credentials count as unset so a stray `KEY=` line never
    // triggers a network call.
    let credential = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let semrush_api_key = credential("SEMRUSH_API_KEY");
    let serper_api_key = credential("SERPER_API_KEY");
    let semrush_base_url = or_default("SEMRUSH_BASE_URL", DEFAULT_SEMRUSH_BASE_URL);
    let serper_base_url = or_default("SERPER_BASE_URL", DEFAULT_SERPER_BASE_URL);

    let country = or_default("SEOBRIEF_COUNTRY", "it").to_lowercase();
    let language = or_default("SEOBRIEF_LANGUAGE", "it").to_lowercase();
    let related_limit = parse_usize("SEOBRIEF_RELATED_LIMIT", "50")?;
    let request_timeout_secs = parse_u64("SEOBRIEF_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SEOBRIEF_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("SEOBRIEF_USER_AGENT", "seobrief/0.1 (content-brief)");
    let log_level = or_default("SEOBRIEF_LOG_LEVEL", "info");

    Ok(AppConfig {
        semrush_api_key,
        serper_api_key,
        semrush_base_url,
        serper_base_url,
        country,
        language,
        related_limit,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}
