use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "transtype";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "TRANSTYPE_MODEL";
pub const ENV_BASE_URL: &str = "TRANSTYPE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TRANSTYPE_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "transtype=info"
}

/// Environment configuration problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("{var} must be a whole number of seconds, got {raw:?}")]
    InvalidTimeout { var: &'static str, raw: String },
}

/// Prediction backend and processor settings.
///
/// Owned by one `TranscriptProcessor` and read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Ask the model to justify each extracted value.
    pub include_reasoning: bool,
    /// Request per-token log-probabilities for confidence scoring.
    pub logprobs: bool,
}

impl ProcessorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            include_reasoning: true,
            logprobs: true,
        }
    }

    /// Build from `OPENAI_API_KEY` plus the optional `TRANSTYPE_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_API_KEY))?;

        let mut config = Self::new(api_key);

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: ENV_TIMEOUT_SECS,
                raw: raw.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_reasoning(mut self, include_reasoning: bool) -> Self {
        self.include_reasoning = include_reasoning;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
