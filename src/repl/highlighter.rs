//! Syntax highlighter for command lines typed into the shell
//!
//! Colors the tool word when a grammar is loaded for it, so the user can
//! see at a glance whether the line will produce suggestions at all.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::grammar::GrammarRegistry;

/// Highlighter for partial command lines
pub struct LineHighlighter {
    registry: Arc<GrammarRegistry>,
    enabled: bool,
}

impl LineHighlighter {
    /// Create a new line highlighter
    ///
    /// # Arguments
    /// * `registry` - Registry consulted to recognize tool names
    /// * `enabled` - Whether to apply any styling at all
    pub fn new(registry: Arc<GrammarRegistry>, enabled: bool) -> Self {
        Self { registry, enabled }
    }

    fn is_known_tool(&self, word: &str) -> bool {
        self.registry.resolve(word).is_some()
    }

    fn word_style(&self, word: &str, is_tool: bool) -> Style {
        if is_tool {
            if self.is_known_tool(word) {
                Color::Green.bold().into()
            } else {
                Style::default()
            }
        } else if word.starts_with('-') {
            Color::Cyan.into()
        } else {
            Style::default()
        }
    }
}

impl Highlighter for LineHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut current_word = String::new();
        let mut tool_pending = true;
        let mut in_string = false;
        let mut string_delimiter = ' ';
        let mut string_buffer = String::new();

        // The concatenated segments must reproduce the line exactly so
        // the cursor stays aligned with what the user typed.
        for ch in line.chars() {
            if in_string {
                string_buffer.push(ch);
                if ch == string_delimiter {
                    styled.push((Color::Yellow.into(), string_buffer.clone()));
                    string_buffer.clear();
                    in_string = false;
                }
                continue;
            }

            if ch == '"' || ch == '\'' {
                if !current_word.is_empty() {
                    let style = self.word_style(&current_word, tool_pending);
                    tool_pending = false;
                    styled.push((style, current_word.clone()));
                    current_word.clear();
                }
                in_string = true;
                string_delimiter = ch;
                string_buffer.push(ch);
                continue;
            }

            if ch.is_whitespace() {
                if !current_word.is_empty() {
                    let style = self.word_style(&current_word, tool_pending);
                    tool_pending = false;
                    styled.push((style, current_word.clone()));
                    current_word.clear();
                }
                styled.push((Style::default(), ch.to_string()));
                continue;
            }

            current_word.push(ch);
        }

        if !current_word.is_empty() {
            let style = self.word_style(&current_word, tool_pending);
            styled.push((style, current_word));
        }
        if in_string {
            // Unclosed quote
            styled.push((Color::Yellow.into(), string_buffer));
        }

        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_highlighter(enabled: bool) -> LineHighlighter {
        LineHighlighter::new(Arc::new(GrammarRegistry::bundled()), enabled)
    }

    #[test]
    fn test_tool_recognition() {
        let highlighter = create_test_highlighter(true);
        assert!(highlighter.is_known_tool("conda"));
        assert!(highlighter.is_known_tool("mamba"));
        assert!(!highlighter.is_known_tool("frobnicate"));
    }

    #[test]
    fn test_known_tool_styled() {
        let highlighter = create_test_highlighter(true);
        let result = highlighter.highlight("conda install", 0);
        let rendered = result.render_simple();
        assert!(!rendered.is_empty());
        assert!(rendered.contains("conda"));
        assert!(rendered.contains("install"));
    }

    #[test]
    fn test_unknown_line_renders_plain() {
        let highlighter = create_test_highlighter(true);
        // Unknown tool, no flags, no quotes: every segment keeps the
        // default style and the rendering is the input verbatim.
        let result = highlighter.highlight("hello world", 0);
        assert_eq!(result.render_simple(), "hello world");
    }

    #[test]
    fn test_disabled_highlighting() {
        let highlighter = create_test_highlighter(false);
        let result = highlighter.highlight("conda install --dry-run", 0);
        assert_eq!(result.render_simple(), "conda install --dry-run");
    }

    #[test]
    fn test_flags_styled() {
        let highlighter = create_test_highlighter(true);
        let result = highlighter.highlight("conda install --dry-run -c defaults", 0);
        let rendered = result.render_simple();
        assert!(rendered.contains("--dry-run"));
        assert!(rendered.contains("-c"));
    }

    #[test]
    fn test_quoted_span() {
        let highlighter = create_test_highlighter(true);
        let result = highlighter.highlight("conda activate \"my env\"", 0);
        assert!(result.render_simple().contains("my env"));
    }

    #[test]
    fn test_unclosed_quote_kept() {
        let highlighter = create_test_highlighter(true);
        let result = highlighter.highlight("conda activate \"my en", 0);
        assert!(result.render_simple().contains("my en"));
    }

    #[test]
    fn test_whitespace_preserved() {
        let highlighter = create_test_highlighter(true);
        // Mixed unknown words keep default styling, so render_simple
        // must reproduce the spacing exactly.
        let result = highlighter.highlight("  spaced   out  ", 0);
        assert_eq!(result.render_simple(), "  spaced   out  ");
    }
}
