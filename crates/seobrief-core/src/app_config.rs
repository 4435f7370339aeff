pub const DEFAULT_SEMRUSH_BASE_URL: &str = "https://api.semrush.com/";
pub const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev/";

/// Effective runtime configuration. `Debug` output redacts credentials.
#[derive(Clone)]
pub struct AppConfig {
    pub semrush_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub semrush_base_url: String,
    pub serper_base_url: String,
    pub country: String,
    pub language: String,
    pub related_limit: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "semrush_api_key",
                &self.semrush_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "serper_api_key",
                &self.serper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("semrush_base_url", &self.semrush_base_url)
            .field("serper_base_url", &self.serper_base_url)
            .field("country", &self.country)
            .field("language", &self.language)
            .field("related_limit", &self.related_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
