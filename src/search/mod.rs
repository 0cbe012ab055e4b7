//! Entity search and ranking engine
//!
//! Pipeline: normalize query → match candidates → relevance sort → filters →
//! optional explicit sort → assemble. Paging and caching sit on top.

pub mod cache;
pub mod engine;
pub mod filters;
pub mod matcher;
pub mod pagination;
pub mod query;
pub mod relevance;
pub mod result;
pub mod sort;

pub use cache::{CacheStats, QueryCache, QueryKey};
pub use engine::{EngineOptions, SearchEngine, search};
pub use filters::{FilterPipeline, RatingBounds, RatingRange, SearchFilters};
pub use matcher::{
    DEFAULT_PARTIAL_MATCH_RATIO, MatchKind, Matcher, full_search_text, partial_threshold,
    restricted_search_text,
};
pub use pagination::{Page, paginate};
pub use query::NormalizedQuery;
pub use relevance::{locale_cmp, sort_by_relevance};
pub use result::SearchResult;
pub use sort::{SortBy, SortOrder};
