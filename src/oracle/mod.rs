//! Oracle seams and the LLM-backed implementation of both.
//!
//! `RecommendationOracle` and `MenuTranslationOracle` are the only places the
//! crate talks to a model. `LlmOracle` implements them against any
//! OpenAI-compatible chat-completions endpoint: the model is offered a single
//! `structured_response` tool carrying the payload schema, and whatever comes
//! back is schema-validated, decoded and domain-checked before it is returned.

pub mod menu;
pub mod prompts;
mod recommendation;

use std::{collections::BTreeSet, time::Duration, time::Instant};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    config::OracleConfig,
    core::trip::TripRequest,
    error::Result,
    schemas::{
        validation::{
            inject_schema_instructions, structured_response_tool_choice,
            structured_response_tool_definition,
        },
        CompletionSchema,
    },
    services::{
        chat_client::{ChatClient, ChatCompletionRequest},
        completion::extract_structured_payload,
    },
    types::{decode_payload, DietaryPreference, MenuTranslation, PayloadCheck, TravelRecommendation},
};

pub use menu::MenuImage;

/// Produces a travel recommendation for a validated trip request.
#[async_trait]
pub trait RecommendationOracle: Send + Sync {
    async fn recommend(&self, request: &TripRequest) -> Result<TravelRecommendation>;
}

/// Reads a menu photo and translates it against dietary preferences.
#[async_trait]
pub trait MenuTranslationOracle: Send + Sync {
    async fn translate_menu(
        &self,
        image: &MenuImage,
        preferences: &BTreeSet<DietaryPreference>,
    ) -> Result<MenuTranslation>;
}

/// Chat-completions backed oracle.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: ChatClient,
    model: String,
    vision_model: Option<String>,
    timeout: Duration,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl LlmOracle {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(OracleConfig::new(api_key))
    }

    pub fn from_config(config: OracleConfig) -> Self {
        let mut client = ChatClient::new(config.api_key);
        client.set_base_url(config.base_url);
        Self {
            client,
            model: config.model,
            vision_model: config.vision_model,
            timeout: config.timeout,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(OracleConfig::from_env()?))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.set_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(&self.model)
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One forced `structured_response` round trip, decoded into `T`.
    pub(crate) async fn request_structured<T>(
        &self,
        model: &str,
        system_prompt: &str,
        user_content: Value,
    ) -> Result<T>
    where
        T: CompletionSchema + PayloadCheck,
    {
        let schema = T::schema();
        let messages = vec![
            json!({
                "role": "system",
                "content": inject_schema_instructions(system_prompt, schema),
            }),
            json!({
                "role": "user",
                "content": user_content,
            }),
        ];

        let body = ChatCompletionRequest::new(model, messages)
            .with_tools(vec![structured_response_tool_definition(schema)])
            .with_tool_choice(structured_response_tool_choice())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .into_value();

        info!(
            target: "trip_planner::oracle",
            schema = schema.schema_name(),
            model,
            "dispatching oracle request"
        );
        let started = Instant::now();

        let response = self.client.chat_completion(&body, self.timeout).await?;
        let payload = extract_structured_payload(&response)?;
        debug!(
            target: "trip_planner::oracle",
            schema = schema.schema_name(),
            payload = %payload,
            "structured payload received"
        );
        let decoded = decode_payload::<T>(&payload)?;

        info!(
            target: "trip_planner::oracle",
            schema = schema.schema_name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "oracle request completed"
        );
        Ok(decoded)
    }
}
