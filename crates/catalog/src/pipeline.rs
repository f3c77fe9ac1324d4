//! The per-turn assistant pipeline.
//!
//! One user turn flows through a fixed phase progression:
//!
//! ```text
//! Idle → Planning → Retrieving → Synthesizing → Done
//! ```
//!
//! with two escape edges: a planning failure reaches `Done` through the
//! grounded refusal, and any oracle failure reaches `Done` through fixed
//! fallback text. Both escapes are handled inside the components; the
//! pipeline itself always completes with a reply. No state survives the
//! turn — the conversation transcript is the caller's concern.

use crate::planner::QueryPlanner;
use crate::store::CatalogStore;
use crate::synthesizer::AnswerSynthesizer;
use shelfmate_llm::LlmClient;
use std::sync::Arc;

/// Phase of a single turn, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Planning,
    Retrieving,
    Synthesizing,
    Done,
}

impl TurnPhase {
    /// The phase that follows this one in a normal turn.
    pub fn next(self) -> TurnPhase {
        match self {
            TurnPhase::Idle => TurnPhase::Planning,
            TurnPhase::Planning => TurnPhase::Retrieving,
            TurnPhase::Retrieving => TurnPhase::Synthesizing,
            TurnPhase::Synthesizing => TurnPhase::Done,
            TurnPhase::Done => TurnPhase::Done,
        }
    }
}

/// The full catalog assistant: planner and synthesizer wired to one catalog
/// and one (optional) oracle handle.
pub struct CatalogAssistant {
    planner: QueryPlanner,
    synthesizer: AnswerSynthesizer,
}

impl CatalogAssistant {
    /// Build an assistant over the given catalog and oracle.
    ///
    /// The oracle handle is injected once here and shared by both
    /// components; `None` means the process runs unconfigured and every
    /// turn degrades to fixed fallback text.
    pub fn new(
        store: Arc<CatalogStore>,
        oracle: Option<Arc<dyn LlmClient>>,
        model: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            planner: QueryPlanner::new(store, oracle.clone(), model.clone()),
            synthesizer: AnswerSynthesizer::new(oracle, model, currency),
        }
    }

    /// Process one user turn and return the reply.
    ///
    /// The planner always completes before the synthesizer starts; there is
    /// no speculative synthesis.
    pub async fn respond(&self, user_text: &str) -> String {
        let mut phase = TurnPhase::Idle;

        phase = phase.next();
        tracing::debug!(?phase, "Turn phase");
        let statements = self.planner.plan(user_text).await;

        phase = phase.next();
        tracing::debug!(?phase, "Turn phase");
        let retrieval = self.planner.execute(&statements, user_text);

        phase = phase.next();
        tracing::debug!(?phase, "Turn phase");
        let reply = self.synthesizer.compose(user_text, &retrieval).await;

        phase = phase.next();
        tracing::debug!(?phase, "Turn phase");
        debug_assert_eq!(phase, TurnPhase::Done);

        reply
    }
}
