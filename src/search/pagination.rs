//! Offset/limit paging layered over an assembled result.

use serde::{Deserialize, Serialize};

use super::result::SearchResult;

/// A window over an ordered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    #[must_use]
    pub const fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// The page immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

/// Slice `result` to `page`. `total` keeps the unpaged count and `has_more`
/// reports whether entities remain past the page.
#[must_use]
pub fn paginate(result: SearchResult, page: Page) -> SearchResult {
    let total = result.total;
    let entities: Vec<_> = result
        .entities
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect();
    let has_more = page.offset.saturating_add(entities.len()) < total;
    SearchResult {
        entities,
        total,
        has_more,
    }
}
