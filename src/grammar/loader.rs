//! Grammar loading from TOML definitions
//!
//! Grammars are written as TOML documents and come from two places:
//!
//! - `EmbeddedGrammars`: definitions compiled into the binary
//! - `DirGrammars`: user-provided `<tool>.toml` files in a directory
//!
//! Both implement [`GrammarSource`], which the registry consults in
//! order. A source reports "not mine" with `Ok(None)`; only I/O and
//! parse problems are errors.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, GrammarNode, Multiplicity, OptionSpec, PositionalSpec};

/// A provider of grammars, consulted by the registry.
pub trait GrammarSource: Send + Sync {
    /// Try to produce the grammar for a normalized (lowercase) tool name.
    ///
    /// # Returns
    /// * `Ok(Some(grammar))` if this source knows the tool
    /// * `Ok(None)` if it does not
    /// * `Err` only for I/O or parse failures
    fn load(&self, tool: &str) -> Result<Option<Grammar>>;

    /// Canonical names of every tool this source can provide.
    fn names(&self) -> Vec<String>;
}

/* ========================= TOML document model ========================= */

#[derive(Debug, Deserialize)]
struct GrammarDoc {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    options: Vec<OptionDoc>,
    #[serde(default)]
    subcommands: Vec<SubcommandDoc>,
    #[serde(default)]
    positionals: Vec<PositionalDoc>,
}

#[derive(Debug, Deserialize)]
struct SubcommandDoc {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    order: Option<u32>,
    #[serde(default)]
    options: Vec<OptionDoc>,
    #[serde(default)]
    subcommands: Vec<SubcommandDoc>,
    #[serde(default)]
    positionals: Vec<PositionalDoc>,
}

#[derive(Debug, Deserialize)]
struct OptionDoc {
    forms: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    takes_value: bool,
    #[serde(default)]
    value_choices: Option<Vec<String>>,
    #[serde(default)]
    repeatable: bool,
    #[serde(default)]
    order: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PositionalDoc {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    value_choices: Option<Vec<String>>,
    #[serde(default)]
    variadic: bool,
}

impl GrammarDoc {
    fn into_grammar(self) -> Grammar {
        let display_name = self
            .display_name
            .unwrap_or_else(|| capitalize(&self.name));
        Grammar {
            root: GrammarNode {
                name: self.name.clone(),
                description: None,
                order: None,
                children: self.subcommands.into_iter().map(SubcommandDoc::into_node).collect(),
                options: self.options.into_iter().map(OptionDoc::into_spec).collect(),
                positionals: self.positionals.into_iter().map(PositionalDoc::into_spec).collect(),
            },
            name: self.name,
            display_name,
            description: self.description,
            aliases: self.aliases,
        }
    }
}

impl SubcommandDoc {
    fn into_node(self) -> GrammarNode {
        GrammarNode {
            name: self.name,
            description: self.description,
            order: self.order,
            children: self.subcommands.into_iter().map(SubcommandDoc::into_node).collect(),
            options: self.options.into_iter().map(OptionDoc::into_spec).collect(),
            positionals: self.positionals.into_iter().map(PositionalDoc::into_spec).collect(),
        }
    }
}

impl OptionDoc {
    fn into_spec(self) -> OptionSpec {
        OptionSpec {
            forms: self.forms,
            description: self.description,
            takes_value: self.takes_value,
            value_choices: self.value_choices,
            repeatable: self.repeatable,
            order: self.order,
        }
    }
}

impl PositionalDoc {
    fn into_spec(self) -> PositionalSpec {
        PositionalSpec {
            name: self.name,
            description: self.description,
            value_choices: self.value_choices,
            multiplicity: if self.variadic {
                Multiplicity::ZeroOrMore
            } else {
                Multiplicity::One
            },
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parse and validate one grammar from TOML text.
///
/// # Arguments
/// * `text` - The TOML document
/// * `origin` - Where the text came from, for error messages
pub fn parse_grammar_str(text: &str, origin: &str) -> std::result::Result<Grammar, GrammarError> {
    let doc: GrammarDoc = toml::from_str(text).map_err(|e| GrammarError::Toml {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    let grammar = doc.into_grammar();
    grammar.validate()?;
    Ok(grammar)
}

/* ========================= Sources ========================= */

/// Grammar definitions compiled into the binary.
const EMBEDDED: &[(&str, &str)] = &[("conda", include_str!("definitions/conda.toml"))];

/// Source backed by the compiled-in definitions.
pub struct EmbeddedGrammars;

impl GrammarSource for EmbeddedGrammars {
    fn load(&self, tool: &str) -> Result<Option<Grammar>> {
        for (name, text) in EMBEDDED {
            let grammar = parse_grammar_str(text, &format!("embedded:{name}"))?;
            if grammar.answers_to(tool) {
                info!("loaded embedded grammar for '{}'", tool);
                return Ok(Some(grammar));
            }
        }
        Ok(None)
    }

    fn names(&self) -> Vec<String> {
        EMBEDDED.iter().map(|(name, _)| name.to_string()).collect()
    }
}

/// Source backed by `<tool>.toml` files in a directory.
///
/// Resolution is by file name only, so an alias resolves here only if a
/// file carries the alias as its name. A missing directory is the same
/// as an empty one.
pub struct DirGrammars {
    directory: PathBuf,
}

impl DirGrammars {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

impl GrammarSource for DirGrammars {
    fn load(&self, tool: &str) -> Result<Option<Grammar>> {
        let path = self.directory.join(format!("{tool}.toml"));
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)?;
        let grammar = parse_grammar_str(&text, &path.display().to_string())?;
        info!("loaded grammar for '{}' from {}", tool, path.display());
        Ok(Some(grammar))
    }

    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let Ok(entries) = std::fs::read_dir(&self.directory) else {
            return names;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        names
    }
}
