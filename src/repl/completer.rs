//! Completer for reedline - bridges the prediction engine into tab completion

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};
use tokio_util::sync::CancellationToken;

use crate::engine::{Predictor, TokenLine};

/// Grammar-driven completer for reedline
pub struct PredictCompleter {
    /// Engine producing the suggestions
    predictor: Arc<Predictor>,
}

impl PredictCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `predictor` - Shared prediction engine
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(predictor: Arc<Predictor>) -> Self {
        Self { predictor }
    }
}

impl Completer for PredictCompleter {
    /// Complete the input at the given cursor position
    ///
    /// Only the text before the cursor is considered; the replacement span
    /// covers the in-progress word so accepting a suggestion swaps it out.
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = &line[..pos];
        let start = TokenLine::parse(line).prefix_start();

        // Interactive completion has no caller that cancels it.
        let suggestions = self.predictor.suggest(line, &CancellationToken::new());

        suggestions
            .into_iter()
            .map(|s| Suggestion {
                value: s.text,
                description: if s.tooltip.is_empty() {
                    None
                } else {
                    Some(s.tooltip)
                },
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarRegistry;

    fn create_test_completer() -> PredictCompleter {
        let registry = Arc::new(GrammarRegistry::bundled());
        PredictCompleter::new(Arc::new(Predictor::new(registry)))
    }

    #[test]
    fn test_complete_subcommands() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("conda ", 6);

        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().any(|s| s.value == "install"));
        assert!(suggestions.iter().any(|s| s.value == "env"));
    }

    #[test]
    fn test_complete_with_prefix() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("conda i", 7);

        assert!(suggestions.iter().any(|s| s.value == "info"));
        assert!(suggestions.iter().any(|s| s.value == "install"));
        assert!(!suggestions.iter().any(|s| s.value == "clean"));
    }

    #[test]
    fn test_span_position() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("conda in", 8);

        // Span covers the in-progress word "in"
        assert!(!suggestions.is_empty());
        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 6);
            assert_eq!(suggestion.span.end, 8);
        }
    }

    #[test]
    fn test_span_at_word_boundary() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("conda ", 6);

        // Nothing typed yet: the span is empty, insertion happens at the cursor
        assert!(!suggestions.is_empty());
        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 6);
            assert_eq!(suggestion.span.end, 6);
        }
    }

    #[test]
    fn test_only_text_before_cursor_counts() {
        let mut completer = create_test_completer();
        // Cursor in the middle of "conda install": completes "i"
        let suggestions = completer.complete("conda install", 7);

        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().all(|s| s.span.start == 6 && s.span.end == 7));
    }

    #[test]
    fn test_description_from_grammar() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("conda env remove --y", 20);

        let yes = suggestions.iter().find(|s| s.value == "--yes").unwrap();
        assert_eq!(yes.description.as_deref(), Some("Do not ask for confirmation"));
    }

    #[test]
    fn test_unknown_tool_yields_nothing() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("frobnicate ", 11);
        assert!(suggestions.is_empty());
    }
}
