//! Oracle client abstraction and request/response types.
//!
//! This module defines the core abstractions for interacting with the
//! text-completion oracle. The contract is deliberately small: content in,
//! optional instruction profile, temperature, text out.

use serde::{Deserialize, Serialize};
use shelfmate_core::AppResult;

/// Oracle completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRequest {
    /// The content to complete (user text plus any injected data)
    pub content: String,

    /// Model identifier (e.g., "gemini-2.5-flash", "llama3.2")
    pub model: String,

    /// Instruction profile constraining the completion (not user-overridable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    /// Temperature for sampling (0.0 for deterministic translation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl OracleRequest {
    /// Create a new oracle request with required fields.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            instruction: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the instruction profile.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Oracle completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleResponse {
    /// The generated text
    pub text: String,

    /// Model that generated the response
    pub model: String,

    /// Usage statistics
    #[serde(default)]
    pub usage: OracleUsage,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OracleUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

impl OracleUsage {
    /// Create usage stats from prompt and completion token counts.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Trait for oracle providers.
///
/// This trait abstracts the underlying text-completion service (Gemini,
/// Ollama, a scripted mock) behind a single blocking-until-done call.
/// Timeout handling belongs to the provider; callers see a completed
/// response or an `AppError::Llm`.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "gemini", "ollama").
    fn provider_name(&self) -> &str;

    /// Perform a completion.
    async fn complete(&self, request: &OracleRequest) -> AppResult<OracleResponse>;
}
