//! The two built-in instruction profiles.
//!
//! Profile text is policy: it encodes the retrieval rules (read-only
//! statements, row caps, superlative ordering, availability default) and the
//! answer contract (tone, grounding, refusal). Templates use Handlebars
//! placeholders and are rendered by `builder`.

/// The retrieval-relevant subset of the product relation, shown to the
/// oracle verbatim.
pub const PRODUCT_SCHEMA: &str = "\
CREATE TABLE products (
    id INTEGER PRIMARY KEY,
    prod_id TEXT,
    name TEXT,
    description TEXT,
    price REAL,
    status BOOLEAN,
    family TEXT,
    suggested_prod_id TEXT
);";

/// An oracle instruction profile: fixed identity, optional sampling
/// temperature, and the Handlebars template for the instruction text.
#[derive(Debug, Clone)]
pub struct InstructionProfile {
    /// Stable profile identifier, used in logs
    pub id: &'static str,

    /// Sampling temperature the profile demands, if it demands one
    pub temperature: Option<f32>,

    /// Handlebars template for the instruction text
    pub template: &'static str,
}

/// SQL translation profile.
///
/// Temperature is pinned to zero: translation must be deterministic so that
/// the same question against an unchanged catalog retrieves the same rows.
pub fn translation() -> InstructionProfile {
    InstructionProfile {
        id: "catalog.translate.sql",
        temperature: Some(0.0),
        template: TRANSLATION_TEMPLATE,
    }
}

/// Persona/grounding profile for answer synthesis.
///
/// No temperature is pinned; phrasing may vary between runs as long as the
/// content stays grounded.
pub fn persona() -> InstructionProfile {
    InstructionProfile {
        id: "catalog.answer.persona",
        temperature: None,
        template: PERSONA_TEMPLATE,
    }
}

const TRANSLATION_TEMPLATE: &str = "\
You are a database expert for a product catalog. Your only task is to \
convert the user's natural-language request into read-only SQL queries \
against this table:

{{schema}}

Strict rules:
1. Respond with a JSON array of SQL statement strings and nothing else. No \
prose, no markdown fences, no explanations.
2. Every statement must be a single SELECT. Never write INSERT, UPDATE, \
DELETE, DROP, ALTER, CREATE, PRAGMA or any other kind of statement.
3. Every statement must end with LIMIT 5 or lower. If the user asks for \
more than 5 items, use LIMIT 5 anyway.
4. For superlatives like \"most expensive\", ORDER BY price DESC; for \
\"cheapest\" or bargain wording, ORDER BY price ASC. Clamp any requested \
count to the range 1 to 5.
5. For \"an example\", \"show me one\" or \"any product\", use ORDER BY \
RANDOM() LIMIT 1.
6. For a product family or category without an explicit count, match with \
LIKE on family or subfamily and LIMIT 5. Use LIKE for name searches too.
7. If the request has several distinct parts (for example \"2 expensive \
and 3 cheap ones\"), produce one array element per part.
8. Add status = 1 to every WHERE clause unless the user explicitly asks \
for unavailable, discontinued or out-of-stock items.";

const PERSONA_TEMPLATE: &str = "\
You are a friendly sales assistant for a product catalog. Your only source \
of information is the product data supplied with each request. Always \
answer in a polite, professional tone. Mention the price and the \
availability of every product explicitly. All prices are in {{currency}}. \
When product data is supplied, build your answer from it; never claim that \
no information was found. If the request is unrelated to the catalog, \
kindly reply that you can only help with questions about the product \
catalog.";

/// Handlebars template for the grounded synthesis content.
pub(crate) const GROUNDED_CONTENT_TEMPLATE: &str = "\
The user asked: \"{{user_text}}\".

The catalog returned the following products:
{{records}}

Write a clear, friendly reply that answers the user's request using this \
information. Remember: prices are in {{currency}}.";
