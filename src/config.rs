use std::env;
use std::error::Error;
use std::fmt;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MODEL_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "{API_KEY_VAR} is not set. Create a .env file with {API_KEY_VAR}=your_key_here"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Credential for the completion service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub model: String,
    pub model_base_url: String,
    pub model_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(
        mut get_var: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = parse_api_key(get_var(API_KEY_VAR).as_deref())?;
        let model = non_empty(get_var("MODEL").as_deref())
            .unwrap_or(DEFAULT_MODEL)
            .to_string();
        let model_base_url = non_empty(get_var("MODEL_BASE_URL").as_deref())
            .unwrap_or(DEFAULT_MODEL_BASE_URL)
            .to_string();
        let model_timeout_secs = parse_model_timeout_secs(get_var("MODEL_TIMEOUT_SECS").as_deref());

        Ok(Self {
            api_key,
            model,
            model_base_url,
            model_timeout_secs,
        })
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_api_key(raw: Option<&str>) -> Result<ApiKey, ConfigError> {
    non_empty(raw)
        .map(ApiKey::new)
        .ok_or(ConfigError::MissingApiKey)
}

fn parse_model_timeout_secs(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
}
