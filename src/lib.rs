//! entity-search - search and ranking for review-platform entities
//!
//! Given a free-text query and structured filters, selects, ranks, filters
//! and sorts a snapshot of entities deterministically.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod search;
pub mod test_utils;

pub use error::{EsError, Result};
pub use search::{SearchEngine, SearchFilters, SearchResult, search};
