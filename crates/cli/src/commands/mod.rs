//! Command handlers for the Shelfmate CLI.

mod ask;
mod chat;
mod seed;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use seed::SeedCommand;

use shelfmate_catalog::{seed::seed_if_empty, CatalogAssistant, CatalogStore};
use shelfmate_core::config::AppConfig;
use shelfmate_core::AppResult;
use shelfmate_llm::{create_client, LlmClient};
use std::sync::Arc;

/// Build the oracle client from configuration, if one can be configured.
///
/// An absent API key for a provider that needs one is the valid
/// "unconfigured" steady state: the assistant still runs and answers with
/// its fixed fallback text.
pub(crate) fn build_oracle(config: &AppConfig) -> Option<Arc<dyn LlmClient>> {
    let api_key = config.resolve_api_key();

    if config.provider == "gemini" && api_key.is_none() {
        tracing::warn!(
            "No API key found for provider '{}'; running without an oracle",
            config.provider
        );
        return None;
    }

    match create_client(&config.provider, config.endpoint.as_deref(), api_key.as_deref()) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!("Failed to create oracle client: {}; running without one", e);
            None
        }
    }
}

/// Open the catalog, seed it if empty, and wire up the assistant.
pub(crate) fn build_assistant(config: &AppConfig) -> AppResult<CatalogAssistant> {
    let store = Arc::new(CatalogStore::open(&config.catalog_path())?);
    let inserted = seed_if_empty(&store, config.seed_count, &config.currency)?;
    if inserted > 0 {
        tracing::info!("Catalog seeded with {} products", inserted);
    }

    let oracle = build_oracle(config);

    Ok(CatalogAssistant::new(
        store,
        oracle,
        config.model.clone(),
        config.currency.clone(),
    ))
}
