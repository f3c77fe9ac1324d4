//! Instruction profiles for the Shelfmate oracle.
//!
//! The oracle is called under exactly two instruction profiles, neither of
//! which is user-overridable:
//! - the **translation profile**, which turns free text into bounded
//!   read-only SQL against the product schema, and
//! - the **persona profile**, which turns retrieved records into a polite,
//!   grounded sales-assistant reply.
//!
//! Profiles are fixed policy text rendered with Handlebars; the hard limits
//! they describe (row caps, read-only statements, availability filtering)
//! are additionally enforced in the planner, which treats oracle output as
//! untrusted.

pub mod builder;
pub mod profiles;

pub use builder::{
    grounded_content, persona_instruction, translation_instruction,
};
pub use profiles::{InstructionProfile, PRODUCT_SCHEMA};
