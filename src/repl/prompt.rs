//! Custom prompt implementation for the interactive shell

use std::sync::Arc;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use crate::engine::Predictor;

/// Prompt showing which tool the engine is currently focused on
///
/// The label follows the predictor's display name, so it switches from the
/// generic engine name to e.g. `Conda> ` once a conda line has been matched.
pub struct PredictPrompt {
    /// Engine whose display name is rendered
    predictor: Arc<Predictor>,
}

impl PredictPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `predictor` - Shared prediction engine
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(predictor: Arc<Predictor>) -> Self {
        Self { predictor }
    }
}

impl Prompt for PredictPrompt {
    /// Render the left prompt (main prompt)
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Prompt string
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("{}> ", self.predictor.name()).into()
    }

    /// Render the right prompt (empty in our case)
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Right prompt string (empty)
    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Indicator string (empty since we include it in left prompt)
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the multiline prompt indicator
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Multiline indicator
    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    /// Render the history search prompt
    ///
    /// # Arguments
    /// * `history_search` - History search state
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - History search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
