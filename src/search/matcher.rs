//! Candidate matching.
//!
//! An entity matches when, in order: the query is empty, the whole query is a
//! substring of its search text, every token is, or (for multi-token queries)
//! at least `ceil(tokens * ratio)` tokens are.

use crate::core::Entity;

use super::query::NormalizedQuery;

/// Fraction of tokens that must hit for a partial match.
pub const DEFAULT_PARTIAL_MATCH_RATIO: f64 = 0.5;

/// Which rule admitted an entity into the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    EmptyQuery,
    Exact,
    AllTokens,
    Partial,
}

/// Lowercased text used for matching: name, description, organization,
/// location and subcategory.
pub fn full_search_text(entity: &Entity) -> String {
    join_lowercase([
        Some(entity.name.as_str()),
        entity.description.as_deref(),
        entity.organization(),
        entity.location(),
        entity.subcategory.as_deref(),
    ])
}

/// Lowercased text used for relevance ties: name, description, organization.
/// Location and subcategory count for matching but not for ranking.
pub fn restricted_search_text(entity: &Entity) -> String {
    join_lowercase([
        Some(entity.name.as_str()),
        entity.description.as_deref(),
        entity.organization(),
    ])
}

fn join_lowercase<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Minimum number of token hits for a partial match.
#[must_use]
pub fn partial_threshold(token_count: usize, ratio: f64) -> usize {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let needed = (token_count as f64 * ratio).ceil() as usize;
    needed.max(1)
}

/// Decides candidate-set membership for a single query.
#[derive(Debug, Clone)]
pub struct Matcher<'q> {
    query: &'q NormalizedQuery,
    partial_ratio: f64,
}

impl<'q> Matcher<'q> {
    #[must_use]
    pub const fn new(query: &'q NormalizedQuery, partial_ratio: f64) -> Self {
        Self {
            query,
            partial_ratio,
        }
    }

    /// Classify an entity, or `None` if it is excluded.
    #[must_use]
    pub fn classify(&self, entity: &Entity) -> Option<MatchKind> {
        if self.query.is_empty() {
            return Some(MatchKind::EmptyQuery);
        }

        let text = full_search_text(entity);
        if text.contains(self.query.text.as_str()) {
            return Some(MatchKind::Exact);
        }

        let tokens = &self.query.tokens;
        let hits = tokens
            .iter()
            .filter(|token| text.contains(token.as_str()))
            .count();
        if hits == tokens.len() {
            return Some(MatchKind::AllTokens);
        }

        if tokens.len() > 1 && hits >= partial_threshold(tokens.len(), self.partial_ratio) {
            return Some(MatchKind::Partial);
        }

        None
    }

    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        self.classify(entity).is_some()
    }
}
