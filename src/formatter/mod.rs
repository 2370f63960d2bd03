//! Output formatting for suggestion lists and the tool catalog
//!
//! This module renders engine output for the command line:
//! - Plain text with aligned tooltips, for interactive use and piping
//! - JSON (pretty-printed, optionally colored) for scripting
//! - Table rendering with width limits for wide tooltips
//!
//! Formatting is presentation only. Result caps and tooltip visibility
//! come from the `[display]` config section and never change what the
//! engine itself computed.

use colored_json::prelude::*;
use nu_ansi_term::Color;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color as TableColor, Modify, Style, object::Columns, object::Rows,
        width::Width,
    },
};

use crate::config::{DisplayConfig, OutputFormat};
use crate::engine::Suggestion;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::utils;

/// Maximum width for the tooltip column before wrapping
const MAX_TOOLTIP_WIDTH: usize = 60;

/// Renders suggestion lists in the configured output format.
pub struct SuggestionFormatter {
    format: OutputFormat,
    use_colors: bool,
    show_tooltips: bool,
    max_suggestions: usize,
}

impl SuggestionFormatter {
    /// Create a formatter with explicit settings.
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self {
            format,
            use_colors,
            show_tooltips: true,
            max_suggestions: 0,
        }
    }

    /// Create a formatter from the `[display]` config section.
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            format: display.format,
            use_colors: display.color_output,
            show_tooltips: display.show_tooltips,
            max_suggestions: display.max_suggestions,
        }
    }

    /// Render a suggestion list.
    ///
    /// # Arguments
    /// * `suggestions` - Ordered suggestions from the engine
    ///
    /// # Returns
    /// * `Result<String>` - Rendered output in the configured format
    pub fn format(&self, suggestions: &[Suggestion]) -> Result<String> {
        let visible = self.visible(suggestions);
        match self.format {
            OutputFormat::Text => Ok(self.format_text(visible)),
            OutputFormat::Json => Ok(self.format_json(visible)),
            OutputFormat::Table => Ok(self.format_table(visible)),
        }
    }

    /// Apply the display cap; zero means unlimited.
    fn visible<'a>(&self, suggestions: &'a [Suggestion]) -> &'a [Suggestion] {
        if self.max_suggestions > 0 && suggestions.len() > self.max_suggestions {
            &suggestions[..self.max_suggestions]
        } else {
            suggestions
        }
    }

    fn format_text(&self, suggestions: &[Suggestion]) -> String {
        if suggestions.is_empty() {
            return "(no suggestions)".to_string();
        }

        let width = suggestions
            .iter()
            .map(|s| s.text.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            if !self.show_tooltips || suggestion.tooltip.is_empty() {
                lines.push(suggestion.text.clone());
                continue;
            }
            let tooltip = utils::string::truncate(&suggestion.tooltip, MAX_TOOLTIP_WIDTH);
            let tooltip = if self.use_colors {
                Color::DarkGray.paint(tooltip).to_string()
            } else {
                tooltip
            };
            lines.push(format!("{:width$}  {}", suggestion.text, tooltip));
        }
        lines.join("\n")
    }

    fn format_json(&self, suggestions: &[Suggestion]) -> String {
        let entries: Vec<serde_json::Value> = suggestions
            .iter()
            .map(|s| json!({ "text": s.text, "tooltip": s.tooltip }))
            .collect();

        let json_str = serde_json::to_string_pretty(&entries)
            .unwrap_or_else(|_| "[]".to_string());

        if self.use_colors {
            json_str.to_colored_json_auto().unwrap_or(json_str)
        } else {
            json_str
        }
    }

    fn format_table(&self, suggestions: &[Suggestion]) -> String {
        if suggestions.is_empty() {
            return "(no suggestions)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["Suggestion", "Description"]);
        for suggestion in suggestions {
            let tooltip = if self.show_tooltips {
                suggestion.tooltip.as_str()
            } else {
                ""
            };
            builder.push_record([suggestion.text.as_str(), tooltip]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.with(Modify::new(Columns::new(1..=1)).with(Width::wrap(MAX_TOOLTIP_WIDTH)));
        table.with(Modify::new(Rows::first()).with(Alignment::center()));
        if self.use_colors {
            table.modify(Rows::first(), TableColor::FG_CYAN | TableColor::BOLD);
        }
        table.to_string()
    }
}

/// Render the catalog of known tools as a table.
pub fn format_tool_catalog(grammars: &[std::sync::Arc<Grammar>]) -> String {
    if grammars.is_empty() {
        return "(no grammars installed)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Tool", "Aliases", "Description"]);
    for grammar in grammars {
        builder.push_record([
            grammar.display_name.as_str(),
            &grammar.aliases.join(", "),
            &utils::string::truncate(&grammar.description, MAX_TOOLTIP_WIDTH),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
