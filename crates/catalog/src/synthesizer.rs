//! Answer synthesis: retrieved records in, persona-constrained reply out.
//!
//! The synthesizer is the only component that talks back to the user, and
//! its contract is infallible: whatever happens — no oracle, no records, a
//! transport failure mid-composition — the caller always gets a polite
//! natural-language string, never an error.

use crate::types::Retrieval;
use shelfmate_llm::{LlmClient, OracleRequest};
use shelfmate_prompt::{builder, persona_instruction};
use std::sync::Arc;

/// Reply when the oracle was never configured. Returned without attempting
/// any oracle call.
pub const NOT_CONFIGURED_REPLY: &str = "I'm sorry, the assistant is not fully set up yet. \
Please configure an oracle API key to enable catalog answers.";

/// Fixed scope refusal: the only acceptable reply when retrieval produced
/// no records or the request is unrelated to the catalog.
pub const SCOPE_REFUSAL: &str = "I'm sorry, I can only help with questions about our product \
catalog, and I couldn't find any matching products for that request.";

/// Disclosure appended when results were cut at the row cap.
pub const TRUNCATION_DISCLOSURE: &str = "Please note that I'm only showing the first matches; \
the catalog contains more products like these.";

/// Composes the final reply from the planner's retrieval.
pub struct AnswerSynthesizer {
    oracle: Option<Arc<dyn LlmClient>>,
    model: String,
    currency: String,
}

impl AnswerSynthesizer {
    /// Create a synthesizer.
    ///
    /// `currency` is the catalog-wide ISO code the persona states prices in.
    pub fn new(
        oracle: Option<Arc<dyn LlmClient>>,
        model: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            oracle,
            model: model.into(),
            currency: currency.into(),
        }
    }

    /// Compose the reply for one turn.
    ///
    /// Grounding rules:
    /// - no oracle configured: fixed not-configured reply, zero oracle calls;
    /// - empty retrieval: the fixed scope refusal, zero oracle calls;
    /// - otherwise: oracle composition from the records under the persona
    ///   profile, with the truncation disclosure appended when the planner
    ///   cut results at the cap.
    pub async fn compose(&self, user_text: &str, retrieval: &Retrieval) -> String {
        let Some(oracle) = &self.oracle else {
            tracing::debug!("Oracle not configured; returning fixed reply");
            return NOT_CONFIGURED_REPLY.to_string();
        };

        if retrieval.is_empty() {
            tracing::info!("No records retrieved; returning scope refusal");
            return SCOPE_REFUSAL.to_string();
        }

        match self.compose_grounded(oracle.as_ref(), user_text, retrieval).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Synthesis failed: {}", e);
                synthesis_failure_reply(&e.to_string())
            }
        }
    }

    async fn compose_grounded(
        &self,
        oracle: &dyn LlmClient,
        user_text: &str,
        retrieval: &Retrieval,
    ) -> shelfmate_core::AppResult<String> {
        let (profile, instruction) = persona_instruction(&self.currency)?;

        let records_json = serde_json::to_string_pretty(&retrieval.records)?;
        let content = builder::grounded_content(user_text, &records_json, &self.currency)?;

        tracing::debug!(
            "Composing grounded reply from {} record(s) under profile {}",
            retrieval.len(),
            profile.id
        );

        let request = OracleRequest::new(content, &self.model).with_instruction(instruction);
        let response = oracle.complete(&request).await?;

        let mut reply = response.text.trim().to_string();
        if retrieval.truncated {
            reply.push_str("\n\n");
            reply.push_str(TRUNCATION_DISCLOSURE);
        }

        Ok(reply)
    }
}

/// Fixed, user-safe reply for a synthesis failure. The diagnostic detail is
/// a single line for operator visibility; raw faults never reach the user.
fn synthesis_failure_reply(detail: &str) -> String {
    format!(
        "I'm sorry, something went wrong while preparing your answer. \
Please try again in a moment. ({})",
        detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;
    use serde_json::json;
    use shelfmate_llm::MockClient;

    fn record(prod_id: &str, price: f64, status: i64) -> Record {
        let mut record = Record::new();
        record.insert("prod_id".to_string(), json!(prod_id));
        record.insert("price".to_string(), json!(price));
        record.insert("status".to_string(), json!(status));
        record
    }

    fn retrieval_with(records: Vec<Record>, truncated: bool) -> Retrieval {
        Retrieval { records, truncated }
    }

    #[tokio::test]
    async fn test_not_configured_reply() {
        let synthesizer = AnswerSynthesizer::new(None, "mock-model", "PEN");
        let retrieval = retrieval_with(vec![record("PROD0001", 100.0, 1)], false);

        let reply = synthesizer.compose("what do you have?", &retrieval).await;
        assert_eq!(reply, NOT_CONFIGURED_REPLY);
    }

    #[tokio::test]
    async fn test_empty_retrieval_is_exact_scope_refusal_without_oracle_call() {
        let mock = Arc::new(MockClient::new());
        let synthesizer = AnswerSynthesizer::new(Some(mock.clone()), "mock-model", "PEN");

        let reply = synthesizer
            .compose("tell me a joke about pirates", &Retrieval::empty())
            .await;

        assert_eq!(reply, SCOPE_REFUSAL);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_grounded_reply_passes_records_and_persona() {
        let mock = Arc::new(MockClient::with_responses([
            "The Laptop Pro costs S/ 4500.00 and is available.",
        ]));
        let synthesizer = AnswerSynthesizer::new(Some(mock.clone()), "mock-model", "PEN");
        let retrieval = retrieval_with(vec![record("PROD0001", 4500.0, 1)], false);

        let reply = synthesizer.compose("how much is the laptop?", &retrieval).await;

        assert_eq!(reply, "The Laptop Pro costs S/ 4500.00 and is available.");
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        // Every record's price and availability must be visible to the oracle
        assert!(requests[0].content.contains("4500"));
        assert!(requests[0].content.contains("\"status\": 1"));
        assert!(requests[0].content.contains("PROD0001"));
        let instruction = requests[0].instruction.as_deref().unwrap();
        assert!(instruction.contains("sales assistant"));
        assert!(instruction.contains("PEN"));
    }

    #[tokio::test]
    async fn test_truncation_disclosure_appended() {
        let mock = Arc::new(MockClient::with_responses(["Here are five products."]));
        let synthesizer = AnswerSynthesizer::new(Some(mock), "mock-model", "PEN");
        let records = (0..5).map(|i| record(&format!("PROD000{}", i), 10.0, 1)).collect();
        let retrieval = retrieval_with(records, true);

        let reply = synthesizer.compose("show everything", &retrieval).await;

        assert!(reply.starts_with("Here are five products."));
        assert!(reply.ends_with(TRUNCATION_DISCLOSURE));
    }

    #[tokio::test]
    async fn test_no_disclosure_without_truncation() {
        let mock = Arc::new(MockClient::with_responses(["Two nice products."]));
        let synthesizer = AnswerSynthesizer::new(Some(mock), "mock-model", "PEN");
        let records = vec![record("PROD0001", 10.0, 1), record("PROD0002", 20.0, 1)];
        let retrieval = retrieval_with(records, false);

        let reply = synthesizer.compose("two products please", &retrieval).await;
        assert_eq!(reply, "Two nice products.");
    }

    #[tokio::test]
    async fn test_oracle_failure_yields_fixed_safe_reply() {
        let mock = Arc::new(MockClient::failing());
        let synthesizer = AnswerSynthesizer::new(Some(mock), "mock-model", "PEN");
        let retrieval = retrieval_with(vec![record("PROD0001", 100.0, 1)], false);

        let reply = synthesizer.compose("how much?", &retrieval).await;

        assert!(reply.starts_with("I'm sorry, something went wrong"));
        assert!(reply.contains("mock oracle unavailable"));
    }
}
