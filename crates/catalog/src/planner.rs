//! Query planning: free text in, bounded catalog records out.
//!
//! The planner delegates translation to the oracle under the fixed SQL
//! instruction profile, then treats what comes back as an untrusted plan:
//! every statement is validated against the read-only discipline, executed
//! independently, and capped. The planner's contract is infallible — any
//! failure (no oracle, transport error, unusable statement, execution
//! error) degrades to an empty or partial retrieval, never an error to the
//! caller.

use crate::intent;
use crate::sql;
use crate::store::CatalogStore;
use crate::types::{Record, Retrieval};
use shelfmate_core::AppResult;
use shelfmate_llm::{LlmClient, OracleRequest};
use shelfmate_prompt::translation_instruction;
use std::sync::Arc;

/// Hard cap on rows returned by any single statement, enforced after
/// execution regardless of what the oracle generated.
pub const MAX_ROWS_PER_STATEMENT: usize = 5;

/// Translates user intent into bounded read statements and executes them.
pub struct QueryPlanner {
    store: Arc<CatalogStore>,
    oracle: Option<Arc<dyn LlmClient>>,
    model: String,
}

impl QueryPlanner {
    /// Create a planner over the given catalog.
    ///
    /// `oracle` is `None` when the process runs without oracle
    /// configuration; planning then always yields an empty retrieval.
    pub fn new(
        store: Arc<CatalogStore>,
        oracle: Option<Arc<dyn LlmClient>>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            oracle,
            model: model.into(),
        }
    }

    /// One full planning + retrieval pass for a user turn.
    pub async fn retrieve(&self, user_text: &str) -> Retrieval {
        let statements = self.plan(user_text).await;
        if statements.is_empty() {
            return Retrieval::empty();
        }
        self.execute(&statements, user_text)
    }

    /// Translate the user's text into candidate statements.
    ///
    /// Returns an empty list when the oracle is unconfigured or the
    /// translation call fails; no retry is made within the turn.
    pub async fn plan(&self, user_text: &str) -> Vec<String> {
        let Some(oracle) = &self.oracle else {
            tracing::debug!("Oracle not configured; planning skipped");
            return Vec::new();
        };

        match self.translate(oracle.as_ref(), user_text).await {
            Ok(statements) => {
                tracing::debug!("Oracle proposed {} statement(s)", statements.len());
                statements
            }
            Err(e) => {
                tracing::warn!("Translation failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Validate and execute statements, concatenating results in statement
    /// order. A statement that fails validation or execution is skipped
    /// without affecting the others.
    pub fn execute(&self, statements: &[String], user_text: &str) -> Retrieval {
        let include_unavailable = intent::wants_unavailable(user_text);
        let mut retrieval = Retrieval::empty();

        for statement in statements {
            if let Err(e) = sql::validate_read_only(statement) {
                tracing::warn!("Dropping statement: {}", e);
                continue;
            }

            match self.store.execute_read(statement, MAX_ROWS_PER_STATEMENT) {
                Ok((rows, truncated)) => {
                    let kept = if include_unavailable {
                        rows
                    } else {
                        rows.into_iter().filter(is_available).collect()
                    };
                    retrieval.truncated |= truncated;
                    retrieval.records.extend(kept);
                }
                Err(e) => {
                    tracing::warn!("Skipping failed statement: {}", e);
                }
            }
        }

        tracing::info!(
            "Retrieved {} record(s) from {} statement(s) (truncated: {})",
            retrieval.len(),
            statements.len(),
            retrieval.truncated
        );

        retrieval
    }

    async fn translate(&self, oracle: &dyn LlmClient, user_text: &str) -> AppResult<Vec<String>> {
        let (profile, instruction) = translation_instruction()?;

        let mut request = OracleRequest::new(user_text, &self.model).with_instruction(instruction);
        if let Some(temperature) = profile.temperature {
            request = request.with_temperature(temperature);
        }

        let response = oracle.complete(&request).await?;
        Ok(sql::parse_statement_list(&response.text))
    }
}

/// Row-level availability check for the default available-only policy.
///
/// Rows that did not select the `status` column pass through: the
/// instructed `WHERE status = 1` filter is the control for those.
fn is_available(record: &Record) -> bool {
    match record.get("status") {
        Some(serde_json::Value::Bool(available)) => *available,
        Some(serde_json::Value::Number(n)) => n.as_i64().map(|i| i != 0).unwrap_or(true),
        _ => true,
    }
}
