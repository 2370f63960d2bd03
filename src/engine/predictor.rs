//! Host-facing prediction surface
//!
//! [`Predictor`] ties the pipeline together: tokenize the input line,
//! resolve the tool grammar through the registry, walk the tokens, then
//! rank and filter the candidates. It also carries the three read-only
//! properties the host displays: a fixed identifier supplied at
//! construction, a description, and a name.
//!
//! The name is deliberately stateful across requests: it starts as the
//! engine's own name and switches to the display name of the most
//! recently resolved tool, so the host's suggestion pane is labelled
//! with whatever the user is typing about. Nothing else persists between
//! requests.

use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::engine::matcher::Matcher;
use crate::engine::suggestion::{Suggestion, format_candidates};
use crate::engine::tokenizer::TokenLine;
use crate::grammar::GrammarRegistry;

/// Name shown before any known tool has been typed.
const ENGINE_NAME: &str = "Predictive Text";

/// Fixed description of the engine.
const ENGINE_DESCRIPTION: &str =
    "Tab-expansion of arguments for popular command line tools.";

/// Grammar-driven completion predictor.
pub struct Predictor {
    id: Uuid,
    registry: Arc<GrammarRegistry>,
    active_tool: RwLock<Option<String>>,
}

impl Predictor {
    /// Predictor with a freshly generated identifier.
    pub fn new(registry: Arc<GrammarRegistry>) -> Self {
        Self::with_id(Uuid::new_v4(), registry)
    }

    /// Predictor with a host-supplied identifier, exposed unchanged
    /// through [`Predictor::id`].
    pub fn with_id(id: Uuid, registry: Arc<GrammarRegistry>) -> Self {
        Self {
            id,
            registry,
            active_tool: RwLock::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name: the active tool's, or the engine's own before any
    /// tool has been resolved.
    pub fn name(&self) -> String {
        self.active_tool
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ENGINE_NAME.to_string())
    }

    pub fn description(&self) -> &'static str {
        ENGINE_DESCRIPTION
    }

    /// Produce the ordered suggestion list for a partial input line.
    ///
    /// Every failure mode degrades to an empty list: unknown tool, no
    /// completed tool token yet, cancellation mid-walk. The host's input
    /// loop must never see an error from here.
    pub fn suggest(&self, line: &str, cancel: &CancellationToken) -> Vec<Suggestion> {
        let tokens = TokenLine::parse(line);
        let Some(tool) = tokens.first_completed() else {
            return Vec::new();
        };
        let Some(grammar) = self.registry.resolve(&tool.text) else {
            debug!("no grammar for '{}', nothing to suggest", tool.text);
            return Vec::new();
        };

        let walk = &tokens.completed()[1..];
        match Matcher::new(&grammar.root).candidates(walk, cancel) {
            Ok(candidates) => {
                *self.active_tool.write().unwrap() = Some(grammar.display_name.clone());
                let suggestions = format_candidates(candidates, tokens.prefix());
                debug!(
                    "{} suggestions for '{}' (prefix '{}')",
                    suggestions.len(),
                    grammar.name,
                    tokens.prefix()
                );
                suggestions
            }
            Err(_) => {
                debug!("prediction for '{}' cancelled", grammar.name);
                Vec::new()
            }
        }
    }
}
