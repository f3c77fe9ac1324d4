//! Oracle integration crate for the Shelfmate catalog assistant.
//!
//! This crate provides a provider-agnostic abstraction for the external
//! text-completion oracle that both pipeline components call: the query
//! planner (SQL translation profile) and the answer synthesizer (persona
//! profile). The oracle is configured at most once per process and injected
//! into both components as an explicit dependency; an absent oracle is a
//! valid steady state, not an error.
//!
//! # Providers
//! - **Gemini**: Google Generative Language API (default)
//! - **Ollama**: local LLM runtime
//! - **Mock**: scripted responses with a call counter, for tests
//!
//! # Example
//! ```no_run
//! use shelfmate_llm::{LlmClient, OracleRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = OracleRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, OracleRequest, OracleResponse, OracleUsage};
pub use factory::create_client;
pub use providers::{GeminiClient, MockClient, OllamaClient};
