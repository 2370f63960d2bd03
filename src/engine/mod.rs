//! Completion engine
//!
//! The engine turns a partial command line into an ordered list of
//! suggestions:
//!
//! - `tokenizer`: split the line into tokens, isolate the prefix filter
//! - `matcher`: walk completed tokens against the tool's grammar tree
//! - `suggestion`: rank, filter, and deduplicate the candidate set
//! - `predictor`: the host-facing facade wiring the registry in
//!
//! The engine holds no per-tool logic. Everything tool-specific comes
//! from grammar data resolved through [`crate::grammar::GrammarRegistry`].

pub mod matcher;
pub mod predictor;
pub mod suggestion;
pub mod tokenizer;

pub use matcher::{Cancelled, Matcher};
pub use predictor::Predictor;
pub use suggestion::{Candidate, Suggestion, format_candidates};
pub use tokenizer::{Token, TokenLine};
