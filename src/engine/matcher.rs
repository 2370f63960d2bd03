//! Grammar-driven token matching
//!
//! The matcher walks the completed tokens of an input line against a
//! grammar tree and reports which tokens are syntactically valid at the
//! cursor. It consumes one token per step, tracking the current
//! subcommand node, which options have been used, and how many
//! positional slots are filled. The walk is tolerant: tokens the grammar
//! does not recognise are absorbed, never an error.
//!
//! Walk state lives only for the duration of one request and never
//! touches the grammar, so any number of requests may share one grammar
//! concurrently. Cancellation is polled at every token step; a cancelled
//! walk stops immediately instead of finishing stale work.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;

use crate::engine::suggestion::Candidate;
use crate::engine::tokenizer::Token;
use crate::grammar::{GrammarNode, Multiplicity, OptionSpec};

/// Marker result for a walk abandoned because the host cancelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Matches token sequences against one grammar tree.
pub struct Matcher<'g> {
    root: &'g GrammarNode,
}

/// Walk state: where we are in the tree and what has been consumed.
struct ParseState<'g> {
    node: &'g GrammarNode,
    consumed: HashSet<usize>,
    positional_index: usize,
    pending_value: Option<&'g OptionSpec>,
}

impl<'g> Matcher<'g> {
    pub fn new(root: &'g GrammarNode) -> Self {
        Self { root }
    }

    /// Walk the completed tokens and collect the candidate set for the
    /// token under the cursor. Candidates are unranked and unfiltered;
    /// ranking and prefix filtering happen at format time.
    ///
    /// # Arguments
    /// * `tokens` - Completed tokens after the tool name, in order
    /// * `cancel` - Host cancellation signal, polled at each step
    pub fn candidates(
        &self,
        tokens: &[Token],
        cancel: &CancellationToken,
    ) -> Result<Vec<Candidate>, Cancelled> {
        let mut state = ParseState::new(self.root);
        for token in tokens {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            state.step(token);
        }
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(state.candidates())
    }
}

impl<'g> ParseState<'g> {
    fn new(root: &'g GrammarNode) -> Self {
        Self {
            node: root,
            consumed: HashSet::new(),
            positional_index: 0,
            pending_value: None,
        }
    }

    /// Consume one completed token.
    fn step(&mut self, token: &Token) {
        // A non-flag token first satisfies an option waiting for its
        // value. A flag abandons the wait and is processed normally.
        if self.pending_value.take().is_some() && !token.is_flag_like() {
            return;
        }

        if let Some(child) = self.node.child(&token.text) {
            // Subcommands open a fresh option/positional scope.
            self.node = child;
            self.consumed.clear();
            self.positional_index = 0;
            return;
        }

        if let Some((index, option)) = self.node.find_option(&token.text) {
            self.consumed.insert(index);
            if option.takes_value {
                self.pending_value = Some(option);
            }
            return;
        }

        if token.is_flag_like() {
            // Unknown option: ignored rather than treated as a value.
            return;
        }

        match self.node.positionals.get(self.positional_index) {
            Some(slot) if slot.multiplicity == Multiplicity::One => {
                self.positional_index += 1;
            }
            // A zero-or-more slot absorbs tokens without filling, and a
            // token with no slot left is ignored.
            _ => {}
        }
    }

    /// Everything the grammar admits as the next token.
    fn candidates(&self) -> Vec<Candidate> {
        // An option waiting for its value restricts the candidates to
        // that option's enumerated values; free-form values offer none.
        if let Some(option) = self.pending_value {
            return match &option.value_choices {
                Some(choices) => choices
                    .iter()
                    .map(|choice| {
                        Candidate::new(choice.clone(), option.description.clone(), option.order)
                    })
                    .collect(),
                None => Vec::new(),
            };
        }

        let mut candidates = Vec::new();

        for child in &self.node.children {
            candidates.push(Candidate::new(
                child.name.clone(),
                child.description.clone(),
                child.order,
            ));
        }

        for (index, option) in self.node.options.iter().enumerate() {
            if self.consumed.contains(&index) && !option.repeatable {
                continue;
            }
            for form in &option.forms {
                candidates.push(Candidate::new(
                    form.clone(),
                    option.description.clone(),
                    option.order,
                ));
            }
        }

        if let Some(slot) = self.node.positionals.get(self.positional_index)
            && let Some(choices) = &slot.value_choices
        {
            for choice in choices {
                candidates.push(Candidate::new(
                    choice.clone(),
                    slot.description.clone(),
                    None,
                ));
            }
        }

        candidates
    }
}
