/// Subscriber options resolved once at startup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
        }
    }

    /// Reads `APP_ENV` and `LOG_FORMAT` (`json` or anything else for text).
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        )
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
