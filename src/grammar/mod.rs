//! Grammar model for command-line tools
//!
//! This module defines the in-memory representation of one tool's command
//! syntax: a tree of subcommands, each carrying its own options and
//! positional arguments. The completion engine walks this model; it never
//! contains per-tool logic, only per-tool data.
//!
//! A grammar is immutable once loaded. Structural invariants (unique
//! sibling names, well-formed option forms, reachable positional slots)
//! are enforced by [`Grammar::validate`] at load time, so the completion
//! path can rely on them unconditionally.

mod loader;
mod registry;

pub use loader::{DirGrammars, EmbeddedGrammars, GrammarSource, parse_grammar_str};
pub use registry::GrammarRegistry;

use crate::error::GrammarError;

/// A fully loaded, validated grammar for one tool.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Canonical tool name, lowercase (e.g. "conda")
    pub name: String,

    /// Display name shown to the user (e.g. "Conda")
    pub display_name: String,

    /// One-line description of the tool
    pub description: String,

    /// Alternative executable names resolving to this grammar
    pub aliases: Vec<String>,

    /// Root of the subcommand tree
    pub root: GrammarNode,
}

/// One node of the subcommand tree (the root or a subcommand).
#[derive(Debug, Clone, Default)]
pub struct GrammarNode {
    /// Node name; for the root this is the tool name
    pub name: String,

    /// Tooltip text for this node when offered as a suggestion
    pub description: Option<String>,

    /// Explicit display order; entries without one sort lexicographically
    pub order: Option<u32>,

    /// Nested subcommands, in definition order
    pub children: Vec<GrammarNode>,

    /// Options accepted at this node
    pub options: Vec<OptionSpec>,

    /// Positional slots accepted at this node, in order
    pub positionals: Vec<PositionalSpec>,
}

/// One logical option with all of its spellings.
#[derive(Debug, Clone, Default)]
pub struct OptionSpec {
    /// All forms of this option (e.g. `-n` and `--name`)
    pub forms: Vec<String>,

    /// Tooltip text for this option's suggestions
    pub description: Option<String>,

    /// Whether the option consumes the following token as its value
    pub takes_value: bool,

    /// Enumerated legal values; None with `takes_value` means free-form
    pub value_choices: Option<Vec<String>>,

    /// Whether the option may appear more than once
    pub repeatable: bool,

    /// Explicit display order for this option's forms
    pub order: Option<u32>,
}

/// One positional argument slot.
#[derive(Debug, Clone, Default)]
pub struct PositionalSpec {
    /// Slot name, used in diagnostics only
    pub name: String,

    /// Tooltip text for enumerated values of this slot
    pub description: Option<String>,

    /// Enumerated legal values; None means free-form
    pub value_choices: Option<Vec<String>>,

    /// How many tokens the slot accepts
    pub multiplicity: Multiplicity,
}

/// How many tokens a positional slot consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Multiplicity {
    /// Exactly one token; the slot is filled afterwards
    #[default]
    One,

    /// Any number of tokens; the slot never fills
    ZeroOrMore,
}

impl Grammar {
    /// Check whether a normalized (lowercase) name refers to this grammar,
    /// either as its canonical name or one of its aliases.
    pub fn answers_to(&self, normalized: &str) -> bool {
        self.name == normalized || self.aliases.iter().any(|a| a == normalized)
    }

    /// Validate the structural invariants of the whole tree.
    ///
    /// # Returns
    /// * `Ok(())` if the grammar is well-formed
    /// * The first violation found otherwise
    pub fn validate(&self) -> std::result::Result<(), GrammarError> {
        if self.name.trim().is_empty() {
            return Err(GrammarError::EmptyName(self.display_name.clone()));
        }
        validate_node(&self.name, &self.root)
    }
}

fn validate_node(tool: &str, node: &GrammarNode) -> std::result::Result<(), GrammarError> {
    // Sibling subcommand names must be unique
    for (i, child) in node.children.iter().enumerate() {
        if node.children[..i].iter().any(|c| c.name == child.name) {
            return Err(GrammarError::DuplicateSubcommand {
                tool: tool.to_string(),
                name: child.name.clone(),
            });
        }
    }

    // Option forms must be non-empty, dash-prefixed, and unique per node
    let mut seen_forms: Vec<&str> = Vec::new();
    for option in &node.options {
        if option.forms.is_empty() {
            return Err(GrammarError::EmptyForms {
                tool: tool.to_string(),
                node: node.name.clone(),
            });
        }
        for form in &option.forms {
            if !form.starts_with('-') {
                return Err(GrammarError::MalformedForm {
                    tool: tool.to_string(),
                    form: form.clone(),
                });
            }
            if seen_forms.contains(&form.as_str()) {
                return Err(GrammarError::DuplicateForm {
                    tool: tool.to_string(),
                    form: form.clone(),
                });
            }
            seen_forms.push(form);
        }
        if option.value_choices.is_some() && !option.takes_value {
            return Err(GrammarError::ChoicesWithoutValue {
                tool: tool.to_string(),
                form: option.forms[0].clone(),
            });
        }
    }

    // A zero-or-more slot swallows everything after it
    for (i, positional) in node.positionals.iter().enumerate() {
        if i + 1 < node.positionals.len() && positional.multiplicity == Multiplicity::ZeroOrMore {
            return Err(GrammarError::UnreachablePositional {
                tool: tool.to_string(),
                name: node.positionals[i + 1].name.clone(),
            });
        }
    }

    for child in &node.children {
        validate_node(tool, child)?;
    }
    Ok(())
}

impl GrammarNode {
    /// Look up a child subcommand by exact name.
    pub fn child(&self, name: &str) -> Option<&GrammarNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Look up the option matching a token, returning its index and spec.
    pub fn find_option(&self, token: &str) -> Option<(usize, &OptionSpec)> {
        self.options
            .iter()
            .enumerate()
            .find(|(_, opt)| opt.forms.iter().any(|f| f == token))
    }
}

impl OptionSpec {
    /// Primary (first-declared) form, used in diagnostics.
    pub fn primary_form(&self) -> &str {
        self.forms.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(forms: &[&str]) -> OptionSpec {
        OptionSpec {
            forms: forms.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    fn grammar_with_root(root: GrammarNode) -> Grammar {
        Grammar {
            name: "tool".to_string(),
            display_name: "Tool".to_string(),
            description: String::new(),
            aliases: Vec::new(),
            root,
        }
    }

    #[test]
    fn test_valid_grammar_passes() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            children: vec![GrammarNode {
                name: "run".to_string(),
                options: vec![option(&["-v", "--verbose"])],
                ..Default::default()
            }],
            options: vec![option(&["-h", "--help"])],
            ..Default::default()
        });
        assert!(grammar.validate().is_ok());
    }

    #[test]
    fn test_duplicate_sibling_subcommand() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            children: vec![
                GrammarNode {
                    name: "run".to_string(),
                    ..Default::default()
                },
                GrammarNode {
                    name: "run".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::DuplicateSubcommand { .. })
        ));
    }

    #[test]
    fn test_duplicate_form_across_options() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            options: vec![option(&["-n", "--name"]), option(&["-n", "--dry-run"])],
            ..Default::default()
        });
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::DuplicateForm { .. })
        ));
    }

    #[test]
    fn test_option_without_forms() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            options: vec![OptionSpec::default()],
            ..Default::default()
        });
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::EmptyForms { .. })
        ));
    }

    #[test]
    fn test_malformed_form() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            options: vec![option(&["verbose"])],
            ..Default::default()
        });
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::MalformedForm { .. })
        ));
    }

    #[test]
    fn test_choices_without_value() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            options: vec![OptionSpec {
                forms: vec!["--solver".to_string()],
                takes_value: false,
                value_choices: Some(vec!["classic".to_string()]),
                ..Default::default()
            }],
            ..Default::default()
        });
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::ChoicesWithoutValue { .. })
        ));
    }

    #[test]
    fn test_unreachable_positional() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            positionals: vec![
                PositionalSpec {
                    name: "packages".to_string(),
                    multiplicity: Multiplicity::ZeroOrMore,
                    ..Default::default()
                },
                PositionalSpec {
                    name: "target".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::UnreachablePositional { .. })
        ));
    }

    #[test]
    fn test_invalid_nested_child_is_caught() {
        let grammar = grammar_with_root(GrammarNode {
            name: "tool".to_string(),
            children: vec![GrammarNode {
                name: "env".to_string(),
                children: vec![
                    GrammarNode {
                        name: "list".to_string(),
                        ..Default::default()
                    },
                    GrammarNode {
                        name: "list".to_string(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        });
        assert!(grammar.validate().is_err());
    }

    #[test]
    fn test_empty_tool_name() {
        let grammar = Grammar {
            name: "  ".to_string(),
            display_name: "Mystery".to_string(),
            description: String::new(),
            aliases: Vec::new(),
            root: GrammarNode::default(),
        };
        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::EmptyName(_))
        ));
    }

    #[test]
    fn test_answers_to_alias() {
        let mut grammar = grammar_with_root(GrammarNode::default());
        grammar.name = "conda".to_string();
        grammar.aliases = vec!["mamba".to_string()];

        assert!(grammar.answers_to("conda"));
        assert!(grammar.answers_to("mamba"));
        assert!(!grammar.answers_to("pip"));
    }

    #[test]
    fn test_child_lookup() {
        let node = GrammarNode {
            name: "tool".to_string(),
            children: vec![GrammarNode {
                name: "env".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(node.child("env").is_some());
        assert!(node.child("ENV").is_none());
        assert!(node.child("missing").is_none());
    }

    #[test]
    fn test_find_option_by_any_form() {
        let node = GrammarNode {
            name: "tool".to_string(),
            options: vec![option(&["-n", "--name"]), option(&["--md5"])],
            ..Default::default()
        };

        let (idx, spec) = node.find_option("--name").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(spec.primary_form(), "-n");

        let (idx, _) = node.find_option("--md5").unwrap();
        assert_eq!(idx, 1);

        assert!(node.find_option("--missing").is_none());
    }
}
