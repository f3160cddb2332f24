use async_trait::async_trait;
use serde_json::Value;

use super::{prompts, LlmOracle, RecommendationOracle};
use crate::{core::trip::TripRequest, error::Result, types::TravelRecommendation};

#[async_trait]
impl RecommendationOracle for LlmOracle {
    async fn recommend(&self, request: &TripRequest) -> Result<TravelRecommendation> {
        let user_prompt = prompts::recommendation_user_prompt(request);
        self.request_structured::<TravelRecommendation>(
            &self.model,
            prompts::recommendation_system_prompt(),
            Value::String(user_prompt),
        )
        .await
    }
}
