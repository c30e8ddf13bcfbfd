use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub opencage_api_key: Option<String>,
    pub geocoder_base_url: String,
    /// ISO 3166-1 alpha-2 code the provider restricts results to.
    pub geocoder_country_code: String,
    /// Appended to shopper queries (e.g. `"Buea, Cameroon"`); `None` disables.
    pub geocoder_query_hint: Option<String>,
    pub geocoder_result_limit: u32,
    pub geocoder_timeout_secs: u64,
    pub user_agent: String,
    pub lookup_debounce_ms: u64,
    /// YAML rate table; the built-in Cameroon table is used when unset.
    pub rates_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "opencage_api_key",
                &self.opencage_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_country_code", &self.geocoder_country_code)
            .field("geocoder_query_hint", &self.geocoder_query_hint)
            .field("geocoder_result_limit", &self.geocoder_result_limit)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("lookup_debounce_ms", &self.lookup_debounce_ms)
            .field("rates_path", &self.rates_path)
            .finish()
    }
}
