//! Predictive Text Library
//!
//! This library provides the core functionality for predictext, a grammar-driven
//! completion-suggestion engine for command line tools. It can be used as a
//! standalone library to add argument completion to shells and REPLs.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `engine`: Tokenization, grammar matching, and suggestion generation
//! - `error`: Error types and handling
//! - `formatter`: Output formatting and display
//! - `grammar`: Tool syntax definitions, loading, and the grammar registry
//! - `repl`: Interactive try-out shell
//! - `utils`: Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use predictext::{engine::Predictor, grammar::GrammarRegistry};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let registry = Arc::new(GrammarRegistry::bundled());
//! let predictor = Predictor::new(registry);
//!
//! let suggestions = predictor.suggest("conda env ", &CancellationToken::new());
//! for suggestion in suggestions {
//!     println!("{}", suggestion.text);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod grammar;
pub mod repl;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Predictor, Suggestion, TokenLine};
pub use error::{PredictextError, Result};
pub use formatter::SuggestionFormatter;
pub use grammar::{Grammar, GrammarRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
