//! Error handling module for predictext.
//!
//! This module provides the error types used across the crate:
//! - Structured grammar-definition errors raised at load time
//! - Configuration errors
//! - A single top-level error type with `From` conversions for `?`
//!
//! Completion itself never surfaces these errors: the suggestion path
//! degrades to an empty list and logs instead, so a broken request can
//! never take down the host's input loop.
//!
//! # Example
//!
//! ```rust,no_run
//! use predictext::error::{Result, PredictextError};
//!
//! fn example_operation() -> Result<()> {
//!     // Fallible setup paths (config, grammar loading) use `?`
//!     // and converge on PredictextError.
//!     Ok(())
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, GrammarError, PredictextError, Result};
