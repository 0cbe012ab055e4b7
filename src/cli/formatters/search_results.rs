//! Search results formatter
//!
//! Renders a `SearchResult` as styled terminal text (Human), JSON, JSONL,
//! plain TSV rows, or TSV with a header.

use console::style;
use serde::Serialize;
use tracing::debug;

use crate::cli::output::{Formattable, HumanLayout, OutputFormat};
use crate::core::Entity;
use crate::search::{Page, SearchFilters, SearchResult};

/// A search result plus the request that produced it, for display.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    pub filters: SearchFilters,
    pub page: Page,
    pub result: SearchResult,
    pub duration_ms: Option<u64>,
    pub color: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponseJson<'a> {
    status: &'static str,
    query: &'a str,
    filters: &'a SearchFilters,
    offset: usize,
    limit: usize,
    count: usize,
    total: usize,
    has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    entities: &'a [Entity],
}

impl SearchResults {
    #[must_use]
    pub fn new(query: impl Into<String>, filters: SearchFilters, page: Page, result: SearchResult) -> Self {
        Self {
            query: query.into(),
            filters,
            page,
            result,
            duration_ms: None,
            color: true,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn to_json_response(&self) -> SearchResponseJson<'_> {
        SearchResponseJson {
            status: "ok",
            query: &self.query,
            filters: &self.filters,
            offset: self.page.offset,
            limit: self.page.limit,
            count: self.result.entities.len(),
            total: self.result.total,
            has_more: self.result.has_more,
            duration_ms: self.duration_ms,
            entities: &self.result.entities,
        }
    }

    fn format_human(&self) -> String {
        debug!(target: "search", results = self.result.entities.len(), "rendering results");

        if self.result.is_empty() {
            return self.format_empty();
        }

        let mut layout = HumanLayout::new().with_color(self.color);
        layout.title(&self.header());
        for (i, entity) in self.result.entities.iter().enumerate() {
            let rank = self.page.offset + i + 1;
            let name = if self.color {
                style(&entity.name).bold().to_string()
            } else {
                entity.name.clone()
            };
            let verified = if entity.is_verified { " [verified]" } else { "" };
            layout.push_line(format!(
                "{rank}. {name} ({}){verified}",
                entity.category.as_str().to_lowercase()
            ));
            layout.push_line(format!(
                "   {:.1} ★  {} reviews",
                entity.rating(),
                entity.reviews()
            ));
            if let Some(org) = entity.organization() {
                layout.push_line(format!("   {org}"));
            }
            if let Some(description) = entity.description.as_deref().filter(|d| !d.is_empty()) {
                layout.push_line(format!("   {description}"));
            }
            layout.blank();
        }
        if self.result.has_more {
            layout.push_line(format!(
                "More results available: --offset {}",
                self.page.next().offset
            ));
        }
        layout.build().trim_end().to_string()
    }

    fn format_empty(&self) -> String {
        let mut layout = HumanLayout::new().with_color(self.color);
        if self.query.trim().is_empty() {
            layout.title("No entities found");
        } else {
            layout.title(&format!("No entities found for '{}'", self.query));
        }
        layout
            .push_line("Try:")
            .bullet("Using fewer or different keywords")
            .bullet("Removing filters (--category, --min-rating, --verified, --has-reviews)");
        if self.result.total > 0 {
            layout.bullet(&format!(
                "Lowering --offset ({} results in total)",
                self.result.total
            ));
        }
        layout.build()
    }

    fn header(&self) -> String {
        let shown = self.result.entities.len();
        let mut header = if self.query.trim().is_empty() {
            format!("{shown} of {} entities", self.result.total)
        } else {
            format!(
                "{shown} of {} results for '{}'",
                self.result.total, self.query
            )
        };
        if let Some(sort_by) = self.filters.sort_by {
            header.push_str(&format!(
                " sorted by {sort_by} {}",
                self.filters.sort_order.unwrap_or_default()
            ));
        }
        if let Some(ms) = self.duration_ms {
            header.push_str(&format!(" in {ms}ms"));
        }
        header
    }

    /// ID<TAB>NAME<TAB>CATEGORY<TAB>RATING<TAB>REVIEWS, no header.
    fn format_plain(&self) -> String {
        self.result
            .entities
            .iter()
            .map(tsv_row)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("id\tname\tcategory\trating\treviews\n");
        for entity in &self.result.entities {
            out.push_str(&tsv_row(entity));
            out.push('\n');
        }
        out
    }

    fn format_jsonl(&self) -> String {
        self.result
            .entities
            .iter()
            .filter_map(|entity| serde_json::to_string(entity).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn tsv_row(entity: &Entity) -> String {
    format!(
        "{}\t{}\t{}\t{:.2}\t{}",
        escape_tsv(&entity.id),
        escape_tsv(&entity.name),
        entity.category,
        entity.rating(),
        entity.reviews()
    )
}

fn escape_tsv(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

impl Formattable for SearchResults {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.to_json_response()).unwrap_or_default()
            }
            OutputFormat::Jsonl => self.format_jsonl(),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}
