//! Suggestion ranking and formatting
//!
//! Takes the raw candidate set produced by the matcher and turns it into
//! the ordered list shown to the user: prefix filter first, then a
//! stable sort, then deduplication by text. Candidates carrying an
//! explicit display order sort ahead of the rest; lexicographic order
//! (case-sensitive) is the tiebreak and the default.

use std::collections::HashSet;

/// A grammar element offered by the matcher, before ranking.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Literal completion text
    pub text: String,

    /// Description from the grammar, if it has one
    pub tooltip: Option<String>,

    /// Explicit display order from the grammar, if defined
    pub order: Option<u32>,
}

impl Candidate {
    pub fn new(text: impl Into<String>, tooltip: Option<String>, order: Option<u32>) -> Self {
        Self {
            text: text.into(),
            tooltip,
            order,
        }
    }
}

/// A completion presented to the host.
///
/// Equality is by text; a formatted result never contains two
/// suggestions with the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,

    /// Human-readable tooltip, empty when the grammar has none
    pub tooltip: String,
}

/// Filter, sort, and deduplicate candidates into the final suggestion
/// list.
///
/// # Arguments
/// * `candidates` - Raw candidates from the matcher
/// * `prefix` - In-progress token text; only candidates starting with it
///   survive (empty matches all, comparison is case-sensitive)
pub fn format_candidates(candidates: Vec<Candidate>, prefix: &str) -> Vec<Suggestion> {
    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.text.starts_with(prefix))
        .collect();

    // Stable, so candidates sharing a sort key keep their grammar order.
    kept.sort_by(|a, b| {
        let a_rank = a.order.unwrap_or(u32::MAX);
        let b_rank = b.order.unwrap_or(u32::MAX);
        a_rank.cmp(&b_rank).then_with(|| a.text.cmp(&b.text))
    });

    let mut seen = HashSet::new();
    let mut suggestions = Vec::with_capacity(kept.len());
    for candidate in kept {
        if seen.insert(candidate.text.clone()) {
            suggestions.push(Suggestion {
                text: candidate.text,
                tooltip: candidate.tooltip.unwrap_or_default(),
            });
        }
    }
    suggestions
}
