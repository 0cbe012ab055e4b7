//! Search orchestration: normalize, match, rank, filter, sort, assemble.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::config::{CacheConfig, SearchConfig};
use crate::core::Entity;

use super::cache::{QueryCache, QueryKey};
use super::filters::{FilterPipeline, RatingBounds, SearchFilters};
use super::matcher::{DEFAULT_PARTIAL_MATCH_RATIO, Matcher};
use super::pagination::{Page, paginate};
use super::query::NormalizedQuery;
use super::relevance::sort_by_relevance;
use super::result::SearchResult;
use super::sort::sort_entities;

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Fraction of query tokens that must hit for a partial match
    pub partial_match_ratio: f64,
    /// Bounds used when a rating filter omits `min` or `max`
    pub rating_defaults: RatingBounds,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            partial_match_ratio: DEFAULT_PARTIAL_MATCH_RATIO,
            rating_defaults: RatingBounds::default(),
        }
    }
}

impl From<&SearchConfig> for EngineOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            partial_match_ratio: config.partial_match_ratio,
            rating_defaults: RatingBounds {
                min: config.default_rating_min,
                max: config.default_rating_max,
            },
        }
    }
}

/// Search with default options and no caching.
#[must_use]
pub fn search(query: &str, filters: Option<&SearchFilters>, candidates: &[Entity]) -> SearchResult {
    run_pipeline(query, filters, candidates, &EngineOptions::default())
}

fn run_pipeline(
    query: &str,
    filters: Option<&SearchFilters>,
    candidates: &[Entity],
    options: &EngineOptions,
) -> SearchResult {
    let start = Instant::now();
    let query = NormalizedQuery::parse(query);

    let matcher = Matcher::new(&query, options.partial_match_ratio);
    let mut selected: Vec<&Entity> = candidates.iter().filter(|e| matcher.matches(e)).collect();
    let matched = selected.len();
    trace!(target: "search", tokens = query.tokens.len(), matched, "candidates matched");

    sort_by_relevance(&mut selected, &query);

    if let Some(filters) = filters {
        FilterPipeline::from_filters(filters, options.rating_defaults).apply(&mut selected);
        if let Some(sort_by) = filters.sort_by {
            sort_entities(&mut selected, sort_by, filters.sort_order.unwrap_or_default());
        }
    }

    let result = SearchResult::assemble(selected);
    debug!(
        target: "search",
        query = %query.text,
        candidates = candidates.len(),
        matched,
        returned = result.total,
        duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        "search complete"
    );
    result
}

/// A configured search engine with an optional result cache.
#[derive(Debug, Default)]
pub struct SearchEngine {
    options: EngineOptions,
    cache: Option<QueryCache>,
}

impl SearchEngine {
    #[must_use]
    pub fn new(search: &SearchConfig, cache: &CacheConfig) -> Self {
        Self {
            options: EngineOptions::from(search),
            cache: cache
                .enabled
                .then(|| QueryCache::new(cache.query_cache_size)),
        }
    }

    #[must_use]
    pub const fn with_options(options: EngineOptions) -> Self {
        Self {
            options,
            cache: None,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&QueryCache> {
        self.cache.as_ref()
    }

    /// Run a search over `candidates`, consulting the cache when enabled.
    #[must_use]
    pub fn search(
        &self,
        query: &str,
        filters: Option<&SearchFilters>,
        candidates: &[Entity],
    ) -> SearchResult {
        let Some(cache) = &self.cache else {
            return run_pipeline(query, filters, candidates, &self.options);
        };

        let key = match QueryKey::new(&NormalizedQuery::parse(query).text, filters, candidates) {
            Ok(key) => key,
            Err(err) => {
                warn!(target: "search", error = %err, "cache key unavailable, searching uncached");
                return run_pipeline(query, filters, candidates, &self.options);
            }
        };
        if let Some(hit) = cache.get(&key) {
            debug!(target: "search", query, returned = hit.total, "cache hit");
            return hit;
        }

        let result = run_pipeline(query, filters, candidates, &self.options);
        cache.put(key, result.clone());
        result
    }

    /// Run a search and slice the result to `page`.
    #[must_use]
    pub fn search_page(
        &self,
        query: &str,
        filters: Option<&SearchFilters>,
        candidates: &[Entity],
        page: Page,
    ) -> SearchResult {
        paginate(self.search(query, filters, candidates), page)
    }
}
