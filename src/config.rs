use std::env;

use crate::llm::openai::XAI_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub xai_api_key: Option<String>,
    pub xai_base_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("APP_PORT must be a number"),
            environment: env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            xai_api_key: env::var("XAI_API_KEY").ok(),
            xai_base_url: env::var("XAI_BASE_URL").unwrap_or_else(|_| XAI_BASE_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
