//! Ask command handler.
//!
//! Runs a single pipeline turn: plan, retrieve, synthesize, print.

use clap::Args;
use shelfmate_core::config::AppConfig;
use shelfmate_core::AppResult;

/// Ask the catalog a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Question: {}", self.question);

        let assistant = super::build_assistant(config)?;
        let reply = assistant.respond(&self.question).await;

        println!("{}", reply);
        Ok(())
    }
}
