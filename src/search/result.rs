//! Result assembly.

use serde::{Deserialize, Serialize};

use crate::core::Entity;

/// Final ordered output of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub entities: Vec<Entity>,
    /// Count after filtering, before any paging
    pub total: usize,
    pub has_more: bool,
}

impl SearchResult {
    /// Package the final ordered set. The engine never pages, so `total`
    /// equals the number of entities and `has_more` is false.
    pub fn assemble<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let entities: Vec<Entity> = entities.into_iter().cloned().collect();
        Self {
            total: entities.len(),
            entities,
            has_more: false,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.id.as_str()).collect()
    }
}
