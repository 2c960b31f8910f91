//! Natural-language explanations of evaluation results.

use crate::agents::llm::LlmClient;
use crate::config::LlmConfig;
use crate::error::ExplainError;
use crate::models::signal::{IndexResult, SignalResult};
use crate::models::strategy::StrategyConfig;
use async_trait::async_trait;

#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain_stock(&self, result: &SignalResult) -> Result<String, ExplainError>;

    async fn explain_indices(&self, results: &[IndexResult]) -> Result<String, ExplainError>;

    async fn explain_strategy(&self, config: &StrategyConfig) -> Result<String, ExplainError>;

    /// Suggest a revised strategy document matching a free-text trading preference.
    async fn edit_strategy(
        &self,
        config: &StrategyConfig,
        preference: &str,
    ) -> Result<String, ExplainError>;
}

/// Explainer that always declines; used when the LLM is not configured.
pub struct DisabledExplainer;

#[async_trait]
impl Explainer for DisabledExplainer {
    async fn explain_stock(&self, _result: &SignalResult) -> Result<String, ExplainError> {
        Err(ExplainError::Disabled)
    }

    async fn explain_indices(&self, _results: &[IndexResult]) -> Result<String, ExplainError> {
        Err(ExplainError::Disabled)
    }

    async fn explain_strategy(&self, _config: &StrategyConfig) -> Result<String, ExplainError> {
        Err(ExplainError::Disabled)
    }

    async fn edit_strategy(
        &self,
        _config: &StrategyConfig,
        _preference: &str,
    ) -> Result<String, ExplainError> {
        Err(ExplainError::Disabled)
    }
}

pub struct LlmExplainer {
    client: LlmClient,
}

impl LlmExplainer {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ExplainError> {
        Ok(Self::new(LlmClient::new(config)?))
    }
}

#[async_trait]
impl Explainer for LlmExplainer {
    async fn explain_stock(&self, result: &SignalResult) -> Result<String, ExplainError> {
        let state = serde_json::to_string_pretty(result)?;
        self.client.complete(&stock_prompt(&state)).await
    }

    async fn explain_indices(&self, results: &[IndexResult]) -> Result<String, ExplainError> {
        let state = serde_json::to_string_pretty(results)?;
        self.client.complete(&index_prompt(&state)).await
    }

    async fn explain_strategy(&self, config: &StrategyConfig) -> Result<String, ExplainError> {
        let state = serde_json::to_string_pretty(config)?;
        self.client.complete(&strategy_prompt(&state)).await
    }

    async fn edit_strategy(
        &self,
        config: &StrategyConfig,
        preference: &str,
    ) -> Result<String, ExplainError> {
        let state = serde_json::to_string_pretty(config)?;
        let reply = self
            .client
            .complete(&strategy_editor_prompt(&state, preference))
            .await?;
        Ok(suggested_document(&reply).to_string())
    }
}

/// Strip a surrounding Markdown code fence, if the model added one.
pub fn suggested_document(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // drop the info string (`yaml`, `yml`, ...) on the opening fence line
    match body.split_once('\n') {
        Some((_, rest)) => rest.trim(),
        None => body.trim(),
    }
}

/// Build the explainer described by `config`.
pub fn build_explainer(config: &LlmConfig) -> Result<Box<dyn Explainer>, ExplainError> {
    if !config.enabled {
        return Ok(Box::new(DisabledExplainer));
    }
    Ok(Box::new(LlmExplainer::from_config(config)?))
}

pub fn stock_prompt(state: &str) -> String {
    format!(
        "You are an equity trend analyst. Below is the latest technical state of one stock as JSON.\n\
         Fields: price, ma_short/ma_long (moving averages), trend (UPTREND/NEUTRAL/DOWNTREND),\n\
         pullback, breakout, resistance, volume/volume_ma/volume_ok, rsi/rsi_in_range,\n\
         cci/cci_in_range (null cci means no signal), timing_ok.\n\n\
         {state}\n\n\
         Explain in at most five short sentences what the structure and timing readings imply.\n\
         Do not give investment advice or price targets."
    )
}

pub fn index_prompt(state: &str) -> String {
    format!(
        "You are a market strategist. Below are the latest trend readings for several market indices as JSON.\n\n\
         {state}\n\n\
         Summarise the overall market environment in at most five short sentences and say how\n\
         supportive it is for single-stock trend-following. Do not give investment advice."
    )
}

pub fn strategy_prompt(state: &str) -> String {
    format!(
        "Below is the configuration of a trend-following stock alert strategy as JSON.\n\n\
         {state}\n\n\
         Explain to a non-expert, in plain language and at most eight sentences, when this\n\
         strategy raises an alert and what each parameter controls."
    )
}

pub fn strategy_editor_prompt(state: &str, preference: &str) -> String {
    format!(
        "Below is the configuration of a trend-following stock alert strategy as JSON.\n\n\
         {state}\n\n\
         The user describes their trading preference as follows:\n\
         {preference}\n\n\
         Adjust the parameters to fit that preference. Keep every section and field name,\n\
         keep short < long for the moving averages and keep the pullback threshold within (0, 1).\n\
         Reply with the complete revised configuration as a YAML document and nothing else."
    )
}
