//! Stage-by-stage behaviour of the search pipeline.

use entity_search::core::Category;
use entity_search::search::{
    EngineOptions, MatchKind, Matcher, NormalizedQuery, Page, QueryCache, SearchEngine,
    SearchFilters, SortBy, SortOrder, search,
};
use entity_search::test_utils::logging::capture_logs;
use entity_search::test_utils::{EntityBuilder, TestCase, run_table_tests, sample_catalog};

use crate::common::ids;

#[test]
fn matcher_rules_table() -> Result<(), String> {
    let entity = EntityBuilder::new("cafe", "Blue Bottle Coffee")
        .category(Category::Places)
        .description("Specialty roaster")
        .location("Oakland, CA")
        .subcategory("Cafe")
        .build();

    let cases = vec![
        TestCase {
            name: "empty query",
            input: "",
            expected: Some(MatchKind::EmptyQuery),
        },
        TestCase {
            name: "exact phrase",
            input: "bottle coffee",
            expected: Some(MatchKind::Exact),
        },
        TestCase {
            name: "phrase spanning fields",
            input: "coffee specialty",
            expected: Some(MatchKind::Exact),
        },
        TestCase {
            name: "tokens out of order",
            input: "coffee blue",
            expected: Some(MatchKind::AllTokens),
        },
        TestCase {
            name: "location token",
            input: "oakland roaster",
            expected: Some(MatchKind::AllTokens),
        },
        TestCase {
            name: "half of two tokens",
            input: "coffee tea",
            expected: Some(MatchKind::Partial),
        },
        TestCase {
            name: "two of four tokens",
            input: "blue coffee tea juice",
            expected: Some(MatchKind::Partial),
        },
        TestCase {
            name: "one of four tokens",
            input: "blue tea juice soda",
            expected: None,
        },
        TestCase {
            name: "one of three tokens",
            input: "cafe tea juice",
            expected: None,
        },
        TestCase {
            name: "single missing token",
            input: "espresso",
            expected: None,
        },
    ];

    run_table_tests(cases, |raw| {
        let query = NormalizedQuery::parse(raw);
        Matcher::new(&query, 0.5).classify(&entity)
    })
}

#[test]
fn exact_restricted_matches_lead_relevance_order() {
    let candidates = vec![
        EntityBuilder::new("a", "Aardvark Roasters").location("Coffee Lane").build(),
        EntityBuilder::new("b", "Zebra Coffee").build(),
        EntityBuilder::new("c", "Mango Coffee").build(),
        EntityBuilder::new("d", "Apple Bakery").subcategory("Coffee").build(),
    ];
    let result = search("coffee", None, &candidates);
    assert_eq!(ids(&result.entities), vec!["c", "b", "a", "d"]);
}

#[test]
fn filters_apply_after_relevance() {
    let candidates = vec![
        EntityBuilder::new("cheap", "Coffee Cart").rating(2.0).reviews(4).build(),
        EntityBuilder::new("best", "Best Coffee").rating(4.9).reviews(0).build(),
        EntityBuilder::new("good", "Good Coffee").rating(4.1).reviews(12).build(),
    ];
    let filters = SearchFilters::new()
        .with_rating(Some(4.0), None)
        .with_has_reviews(true);
    let result = search("coffee", Some(&filters), &candidates);
    assert_eq!(ids(&result.entities), vec!["good"]);
}

#[test]
fn verified_filter_uses_entity_flag() {
    let filters = SearchFilters::new().with_verified(true);
    let first = search("", Some(&filters), &sample_catalog());
    let second = search("", Some(&filters), &sample_catalog());
    assert_eq!(ids(&first.entities), vec!["acme", "prof-johnson"]);
    assert_eq!(first, second);
}

#[test]
fn rating_desc_overrides_relevance() {
    let filters = SearchFilters::new().with_sort(SortBy::Rating, SortOrder::Desc);
    let result = search("", Some(&filters), &sample_catalog());
    assert_eq!(
        ids(&result.entities),
        vec!["prof-johnson", "blue-bottle", "pixel-9", "dr-lee", "acme"]
    );
}

#[test]
fn created_at_sort_orders_by_timestamp() {
    let filters = SearchFilters::new().with_sort(SortBy::CreatedAt, SortOrder::Desc);
    let result = search("", Some(&filters), &sample_catalog());
    assert_eq!(
        ids(&result.entities),
        vec!["pixel-9", "prof-johnson", "dr-lee", "acme", "blue-bottle"]
    );
}

#[test]
fn unknown_sort_keeps_relevance_order() {
    let relevance = search("", None, &sample_catalog());
    let filters = SearchFilters::new().with_sort(SortBy::Unknown, SortOrder::Desc);
    let unknown = search("", Some(&filters), &sample_catalog());
    assert_eq!(relevance, unknown);
}

#[test]
fn engine_pages_and_caches() {
    let engine = SearchEngine::with_options(EngineOptions::default()).with_cache(QueryCache::new(4));
    let catalog = sample_catalog();

    let first = engine.search_page("", None, &catalog, Page::first(2));
    let second = engine.search_page("", None, &catalog, Page::first(2).next());
    let third = engine.search_page("", None, &catalog, Page::new(4, 2));

    assert_eq!(first.total, 5);
    assert!(first.has_more);
    assert!(second.has_more);
    assert!(!third.has_more);
    assert_eq!(third.entities.len(), 1);

    let mut all: Vec<&str> = Vec::new();
    for page in [&first, &second, &third] {
        all.extend(ids(&page.entities));
    }
    assert_eq!(all, ids(&search("", None, &catalog).entities));

    let stats = engine.cache().map(QueryCache::stats).unwrap_or_default();
    assert_eq!((stats.hits, stats.misses), (2, 1));
}

#[test]
fn search_emits_structured_summary() {
    let (result, logs) = capture_logs("search=debug", || {
        search("coffee", None, &sample_catalog())
    });
    let entry = logs.find("search complete").expect("summary event");
    assert_eq!(entry.target, "search");
    assert_eq!(entry.field("candidates"), Some("5"));
    assert_eq!(entry.field("returned"), Some(result.total.to_string().as_str()));
}
