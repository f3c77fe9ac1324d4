//! Rendering of instruction profiles and oracle content.

use crate::profiles::{self, InstructionProfile, GROUNDED_CONTENT_TEMPLATE, PRODUCT_SCHEMA};
use handlebars::Handlebars;
use serde_json::json;
use shelfmate_core::{AppError, AppResult};

/// Render the SQL translation instruction with the product schema injected.
///
/// Returns the profile alongside the rendered text so callers can apply the
/// profile's pinned temperature to the oracle request.
pub fn translation_instruction() -> AppResult<(InstructionProfile, String)> {
    let profile = profiles::translation();
    let rendered = render_template(profile.template, &json!({ "schema": PRODUCT_SCHEMA }))?;
    tracing::debug!("Rendered instruction profile {}", profile.id);
    Ok((profile, rendered))
}

/// Render the persona/grounding instruction for the given catalog currency.
pub fn persona_instruction(currency: &str) -> AppResult<(InstructionProfile, String)> {
    let profile = profiles::persona();
    let rendered = render_template(profile.template, &json!({ "currency": currency }))?;
    tracing::debug!("Rendered instruction profile {}", profile.id);
    Ok((profile, rendered))
}

/// Render the content for a grounded synthesis call: the user's question
/// plus the retrieved records as pretty JSON.
pub fn grounded_content(user_text: &str, records_json: &str, currency: &str) -> AppResult<String> {
    render_template(
        GROUNDED_CONTENT_TEMPLATE,
        &json!({
            "user_text": user_text,
            "records": records_json,
            "currency": currency,
        }),
    )
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &serde_json::Value) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("profile", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("profile", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_instruction_embeds_schema() {
        let (profile, rendered) = translation_instruction().unwrap();
        assert_eq!(profile.temperature, Some(0.0));
        assert!(rendered.contains("CREATE TABLE products"));
        assert!(rendered.contains("suggested_prod_id"));
        assert!(!rendered.contains("{{schema}}"));
    }

    #[test]
    fn test_persona_instruction_embeds_currency() {
        let (_, rendered) = persona_instruction("PEN").unwrap();
        assert!(rendered.contains("All prices are in PEN"));
        assert!(rendered.contains("sales assistant"));
    }

    #[test]
    fn test_grounded_content() {
        let rendered = grounded_content(
            "what laptops do you have?",
            "[{\"name\": \"Laptop X\", \"price\": 1200.0}]",
            "PEN",
        )
        .unwrap();

        assert!(rendered.contains("what laptops do you have?"));
        assert!(rendered.contains("Laptop X"));
        assert!(rendered.contains("prices are in PEN"));
    }

    #[test]
    fn test_no_html_escaping() {
        let rendered = grounded_content("cheap & cheerful", "[]", "PEN").unwrap();
        assert!(rendered.contains("cheap & cheerful"));
    }
}
