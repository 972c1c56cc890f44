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

/// Process-wide settings, built once at startup and passed by reference
/// into the fetcher and the service adapters.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub google_api_key: String,
    pub tavily_api_key: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub about_text_max_chars: usize,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,
    pub search_max_results: usize,
    pub search_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("google_api_key", &"[redacted]")
            .field("tavily_api_key", &"[redacted]")
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("about_text_max_chars", &self.about_text_max_chars)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_timeout_secs", &self.gemini_timeout_secs)
            .field("search_max_results", &self.search_max_results)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .finish()
    }
}
