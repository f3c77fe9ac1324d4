//! Intent detection rules applied to the raw user utterance.
//!
//! Retrieval defaults to available products only. The oracle is told it may
//! drop that filter when the user explicitly asks for unavailable items, but
//! the planner does not leave the decision to oracle discretion: the rule
//! lives here as a fixed, testable phrase list, and rows for unavailable
//! products are filtered out whenever the rule does not match.

/// Phrases that count as explicitly asking for unavailable items.
const UNAVAILABLE_PHRASES: [&str; 7] = [
    "unavailable",
    "out of stock",
    "discontinued",
    "not available",
    "sold out",
    "no longer available",
    "including unavailable",
];

/// Whether the utterance explicitly includes unavailable items.
pub fn wants_unavailable(user_text: &str) -> bool {
    let lowered = user_text.to_lowercase();
    UNAVAILABLE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_unavailable_requests() {
        assert!(wants_unavailable("show me discontinued laptops"));
        assert!(wants_unavailable("which chairs are out of stock?"));
        assert!(wants_unavailable("list products including UNAVAILABLE ones"));
        assert!(wants_unavailable("what is sold out right now"));
    }

    #[test]
    fn test_ordinary_requests_stay_available_only() {
        assert!(!wants_unavailable("show me the cheapest laptop"));
        assert!(!wants_unavailable("what products are available?"));
        assert!(!wants_unavailable("is the Robot Vacuum Orbit available?"));
        assert!(!wants_unavailable("2 expensive and 3 cheap products"));
    }
}
