//! Structured extraction protocol.
//!
//! Turns one block of provider output into either a validated JSON object
//! or the untouched raw text, never anything in between:
//!
//! ```text
//! raw block ──strip fences──▶ JSON parse ──▶ schema validate ──▶ Structured(Value)
//!                                  │                  │
//!                                  └──── failure ─────┴──▶ Unvalidated { raw, error }
//! ```
//!
//! The steering helpers describe how a request asks for schema-bound output
//! in the first place (forced tool call or JSON-only system prompt).

mod fence;
mod protocol;
pub mod steering;

pub use fence::strip_code_fences;
pub use protocol::{Extraction, MalformedResponse, extract_structured};
