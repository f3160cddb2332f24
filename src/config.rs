use std::time::Duration;

use crate::{
    error::{PlannerError, Result},
    services::chat_client::DEFAULT_BASE_URL,
};

pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection settings for the LLM-backed oracles.
#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model used for trip recommendations
    pub model: String,
    /// Model used for menu images; falls back to `model`
    pub vision_model: Option<String>,
    pub timeout: Duration,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl OracleConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            vision_model: None,
            timeout: DEFAULT_TIMEOUT,
            max_tokens: None,
            temperature: Some(DEFAULT_TEMPERATURE),
        }
    }

    /// Read settings from the process environment. Only the API key is required.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlannerError::Config(
                    "OPENAI_API_KEY environment variable must be set before creating an oracle"
                        .to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) =
            std::env::var("OPENAI_BASE_URL").or_else(|_| std::env::var("OPENROUTER_BASE_URL"))
        {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("TRIP_PLANNER_MODEL") {
            config.model = model;
        }
        if let Ok(model) = std::env::var("TRIP_PLANNER_VISION_MODEL") {
            config.vision_model = Some(model);
        }
        Ok(config)
    }

    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(&self.model)
    }
}
