//! Product catalog and assistant pipeline for Shelfmate.
//!
//! This crate owns the two components every user turn flows through, in
//! strict sequence:
//! 1. the **Query Planner**, which translates free text into bounded
//!    read-only SQL via the oracle and executes it against the catalog, and
//! 2. the **Answer Synthesizer**, which turns the retrieved records (or
//!    their absence) into a persona-constrained reply.
//!
//! Neither component ever surfaces an error to its caller: planning failures
//! degrade to an empty retrieval and synthesis failures degrade to fixed
//! fallback text. The catalog itself is read-only after seeding.

pub mod intent;
pub mod pipeline;
pub mod planner;
pub mod seed;
pub mod sql;
pub mod store;
pub mod synthesizer;
pub mod types;

// Re-export the main entry points
pub use pipeline::{CatalogAssistant, TurnPhase};
pub use planner::{QueryPlanner, MAX_ROWS_PER_STATEMENT};
pub use store::CatalogStore;
pub use synthesizer::AnswerSynthesizer;
pub use types::{Product, Record, Retrieval};
