//! Mock oracle provider with scripted responses.
//!
//! The mock queues up response texts and pops one per `complete` call, while
//! counting every call it receives. The counter is what lets tests assert
//! that an unconfigured pipeline never reaches the oracle at all.

use crate::client::{LlmClient, OracleRequest, OracleResponse, OracleUsage};
use shelfmate_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock provider for testing and development.
pub struct MockClient {
    /// Scripted response texts, consumed in order
    responses: Mutex<VecDeque<String>>,

    /// Every request received, in order
    requests: Mutex<Vec<OracleRequest>>,

    /// Number of `complete` calls received
    calls: AtomicUsize,

    /// When set, every call fails with an availability error
    fail: bool,
}

impl MockClient {
    /// Create a mock that echoes a fixed acknowledgement for every call.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Create a mock that returns the given texts in order.
    ///
    /// Once the script is exhausted, further calls return the last text
    /// again so loops in tests stay deterministic.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Create a mock whose every call fails as if the oracle were down.
    pub fn failing() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of `complete` calls this mock has received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &OracleRequest) -> AppResult<OracleResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if self.fail {
            return Err(AppError::Llm("mock oracle unavailable".to_string()));
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| AppError::Llm("mock response queue poisoned".to_string()))?;

        let text = if responses.len() > 1 {
            responses.pop_front().unwrap_or_default()
        } else {
            responses.front().cloned().unwrap_or_else(|| "ok".to_string())
        };

        Ok(OracleResponse {
            text,
            model: request.model.clone(),
            usage: OracleUsage::default(),
        })
    }
}
