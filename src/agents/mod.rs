//! Optional LLM enrichment of alerts.

pub mod explainer;
pub mod llm;

pub use explainer::{
    build_explainer, suggested_document, DisabledExplainer, Explainer, LlmExplainer,
};
pub use llm::LlmClient;
