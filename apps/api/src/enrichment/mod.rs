//! Optional LLM enrichment of an analysis.
//!
//! `AppState` holds an `Arc<dyn Enricher>`. Enrichment is best effort: an
//! enricher never returns an error, only `None` or a degraded
//! [`EnrichedInsights`] carrying an `error` key.

pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::AnalysisResult;
use prompts::{build_enrichment_prompt, ENRICHMENT_SYSTEM};

/// The model's JSON object, kept as-is. Nothing downstream depends on its
/// field types; the accessors below read the few keys the service itself
/// looks at and return `None` for anything missing or oddly typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichedInsights(Map<String, Value>);

impl EnrichedInsights {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    fn fallback(error: String, overall_impression: &str, summary: &str) -> Self {
        let fields = json!({
            "error": error,
            "overall_impression": overall_impression,
            "strengths": [],
            "weaknesses": [],
            "improvement_suggestions": [],
            "summary": summary,
        });
        match fields {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Returned when the model answered but its reply was not a JSON object.
    pub fn parse_failure() -> Self {
        Self::fallback(
            "Could not parse AI response".to_string(),
            "AI analysis encountered an error. Please try again.",
            "Analysis could not be completed.",
        )
    }

    /// Returned for transport, API and quota failures.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::fallback(
            reason.into(),
            "AI analysis is currently unavailable.",
            "Please check your API key and try again.",
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn error(&self) -> Option<&str> {
        self.text("error")
    }

    pub fn overall_impression(&self) -> Option<&str> {
        self.text("overall_impression")
    }

    pub fn summary(&self) -> Option<&str> {
        self.text("summary")
    }

    pub fn is_degraded(&self) -> bool {
        self.get("error").is_some_and(|e| !e.is_null())
    }
}

#[async_trait]
pub trait Enricher: Send + Sync {
    fn is_available(&self) -> bool;

    async fn enrich(
        &self,
        resume_text: &str,
        job_description: &str,
        analysis: &AnalysisResult,
    ) -> Option<EnrichedInsights>;
}

/// Used when no API key is configured.
pub struct DisabledEnricher;

#[async_trait]
impl Enricher for DisabledEnricher {
    fn is_available(&self) -> bool {
        false
    }

    async fn enrich(
        &self,
        _resume_text: &str,
        _job_description: &str,
        _analysis: &AnalysisResult,
    ) -> Option<EnrichedInsights> {
        None
    }
}

pub struct LlmEnricher {
    llm: LlmClient,
}

impl LlmEnricher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

/// Folds an LLM outcome into insights; failures become fallback values.
fn insights_from(outcome: Result<EnrichedInsights, LlmError>) -> EnrichedInsights {
    match outcome {
        Ok(insights) => insights,
        Err(LlmError::Parse(e)) => {
            warn!(error = %e, "Enrichment reply was not valid JSON");
            EnrichedInsights::parse_failure()
        }
        Err(e) => {
            warn!(error = %e, "Enrichment call failed");
            EnrichedInsights::unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl Enricher for LlmEnricher {
    fn is_available(&self) -> bool {
        true
    }

    async fn enrich(
        &self,
        resume_text: &str,
        job_description: &str,
        analysis: &AnalysisResult,
    ) -> Option<EnrichedInsights> {
        let prompt = build_enrichment_prompt(resume_text, job_description, analysis);
        let outcome = self.llm.call_json(&prompt, ENRICHMENT_SYSTEM).await;
        Some(insights_from(outcome))
    }
}

/// Picks the enrichment backend for this process.
pub fn enricher_from_config(config: &Config) -> Arc<dyn Enricher> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        info!("ANTHROPIC_API_KEY not set, AI enrichment disabled");
        return Arc::new(DisabledEnricher);
    };

    let request_timeout = Duration::from_secs(config.enrichment_timeout_secs.max(1));
    match LlmClient::new(api_key, config.llm_model.clone(), request_timeout) {
        Ok(llm) => {
            info!(model = llm.model(), "AI enrichment enabled");
            Arc::new(LlmEnricher::new(llm))
        }
        Err(e) => {
            warn!(error = %e, "Could not build LLM client, AI enrichment disabled");
            Arc::new(DisabledEnricher)
        }
    }
}
