use std::{fmt, io};

/// Crate-wide `Result` type using [`PredictextError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PredictextError>;

/// Top-level error type for predictext operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum PredictextError {
    /// Grammar definition errors.
    Grammar(GrammarError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Grammar-definition errors.
///
/// All of these are raised at grammar-load time. A grammar that passes
/// validation can no longer fail during completion.
#[derive(Debug)]
pub enum GrammarError {
    /// Definition file failed to deserialize.
    Toml { path: String, message: String },

    /// Grammar has an empty tool name.
    EmptyName(String),

    /// Two sibling subcommands share a name.
    DuplicateSubcommand { tool: String, name: String },

    /// Two options within one node share a form.
    DuplicateForm { tool: String, form: String },

    /// An option was declared with no forms at all.
    EmptyForms { tool: String, node: String },

    /// An option form does not start with a dash.
    MalformedForm { tool: String, form: String },

    /// Value choices declared on an option that takes no value.
    ChoicesWithoutValue { tool: String, form: String },

    /// A positional slot is declared after a zero-or-more slot and can
    /// never be reached.
    UnreachablePositional { tool: String, name: String },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PredictextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictextError::Grammar(e) => write!(f, "Grammar error: {e}"),
            PredictextError::Config(e) => write!(f, "Configuration error: {e}"),
            PredictextError::Io(e) => write!(f, "I/O error: {e}"),
            PredictextError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Toml { path, message } => {
                write!(f, "failed to parse '{path}': {message}")
            }
            GrammarError::EmptyName(context) => {
                write!(f, "grammar has an empty tool name ({context})")
            }
            GrammarError::DuplicateSubcommand { tool, name } => {
                write!(f, "{tool}: duplicate subcommand '{name}' among siblings")
            }
            GrammarError::DuplicateForm { tool, form } => {
                write!(f, "{tool}: option form '{form}' declared more than once")
            }
            GrammarError::EmptyForms { tool, node } => {
                write!(f, "{tool}: option under '{node}' declares no forms")
            }
            GrammarError::MalformedForm { tool, form } => {
                write!(f, "{tool}: option form '{form}' must start with '-'")
            }
            GrammarError::ChoicesWithoutValue { tool, form } => {
                write!(f, "{tool}: option '{form}' lists value choices but takes no value")
            }
            GrammarError::UnreachablePositional { tool, name } => {
                write!(
                    f,
                    "{tool}: positional '{name}' follows a zero-or-more slot and is unreachable"
                )
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for PredictextError {}
impl std::error::Error for GrammarError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to PredictextError ========================= */

impl From<io::Error> for PredictextError {
    fn from(err: io::Error) -> Self {
        PredictextError::Io(err)
    }
}

impl From<GrammarError> for PredictextError {
    fn from(err: GrammarError) -> Self {
        PredictextError::Grammar(err)
    }
}

impl From<ConfigError> for PredictextError {
    fn from(err: ConfigError) -> Self {
        PredictextError::Config(err)
    }
}

impl From<String> for PredictextError {
    fn from(msg: String) -> Self {
        PredictextError::Generic(msg)
    }
}

impl From<&str> for PredictextError {
    fn from(msg: &str) -> Self {
        PredictextError::Generic(msg.to_owned())
    }
}
