//! Chat command handler.
//!
//! A line-oriented chat loop: each line is one pipeline turn. The loop owns
//! the session; the pipeline itself holds no state between turns.

use clap::Args;
use shelfmate_core::config::AppConfig;
use shelfmate_core::AppResult;
use std::io::{BufRead, Write};

/// Interactive chat session, one pipeline turn per line
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting chat session");

        let assistant = super::build_assistant(config)?;

        println!(
            "Hello! I'm your sales assistant. Ask me about any product in the \
catalog - features, availability and prices in {}. Type 'exit' to leave.",
            config.currency
        );

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("you> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            let user_text = line.trim();
            if user_text.is_empty() {
                continue;
            }
            if user_text.eq_ignore_ascii_case("exit") || user_text.eq_ignore_ascii_case("quit") {
                break;
            }

            let reply = assistant.respond(user_text).await;
            println!("assistant> {}\n", reply);
        }

        println!("Goodbye!");
        Ok(())
    }
}
