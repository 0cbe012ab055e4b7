//! entity-search search - Search a candidate snapshot

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::emit;
use crate::core::{Category, load_candidates};
use crate::error::{EsError, Result};
use crate::search::{Page, RatingRange, SearchFilters, SortBy, SortOrder};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (empty matches everything)
    #[arg(default_value = "")]
    pub query: String,

    /// JSON snapshot of candidate entities ("-" reads stdin)
    #[arg(long, short = 'c')]
    pub candidates: PathBuf,

    /// Filter by category: professionals, companies, places, products
    #[arg(long)]
    pub category: Option<Category>,

    /// Minimum average rating (inclusive)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum average rating (inclusive)
    #[arg(long)]
    pub max_rating: Option<f64>,

    /// Keep only verified (true) or unverified (false) entities
    #[arg(long)]
    pub verified: Option<bool>,

    /// Keep only entities with at least one review
    #[arg(long)]
    pub has_reviews: bool,

    /// Sort by: name, rating, reviewCount, createdAt (default: relevance)
    #[arg(long)]
    pub sort_by: Option<SortBy>,

    /// Sort direction: asc, desc
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Maximum number of results (default from config)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// Build the filter set these arguments describe.
    pub fn filters(&self) -> Result<SearchFilters> {
        if let (Some(min), Some(max)) = (self.min_rating, self.max_rating) {
            if min > max {
                return Err(EsError::InvalidArgument(format!(
                    "--min-rating {min} exceeds --max-rating {max}"
                )));
            }
        }
        if self.sort_order.is_some() && self.sort_by.is_none() {
            return Err(EsError::InvalidArgument(
                "--sort-order requires --sort-by".to_string(),
            ));
        }

        let rating = (self.min_rating.is_some() || self.max_rating.is_some())
            .then(|| RatingRange::new(self.min_rating, self.max_rating));

        Ok(SearchFilters {
            category: self.category,
            rating,
            verified: self.verified,
            has_reviews: self.has_reviews.then_some(true),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        })
    }
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    debug!(target: "search", mode = ?ctx.output_format, "output mode selected");

    let filters = args.filters()?;
    let candidates = load_candidates(&args.candidates)?;
    let page = Page::new(args.offset, args.limit.unwrap_or(ctx.config.search.default_limit));

    let start = Instant::now();
    let result = ctx.engine.search_page(&args.query, Some(&filters), &candidates, page);
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    info!(
        target: "search",
        query = %args.query,
        candidates = candidates.len(),
        total = result.total,
        returned = result.entities.len(),
        duration_ms,
        "search finished"
    );

    let view = SearchResults::new(args.query.clone(), filters, page, result)
        .with_duration(duration_ms)
        .with_color(ctx.use_color());
    emit(&view, ctx.output_format);
    Ok(())
}
