//! End-to-end behaviour of `search` on the reference scenarios.

use entity_search::core::{Category, Entity};
use entity_search::search::{SearchFilters, SearchResult, SortBy, SortOrder, search};
use entity_search::test_utils::{EntityBuilder, sample_catalog};

use crate::common::{ids, mixed_catalog, names};

#[test]
fn professor_query_matches_on_all_tokens() {
    let mut candidates = sample_catalog();
    candidates.push(
        EntityBuilder::new("visiting", "Visiting Professor Program")
            .category(Category::Professionals)
            .build(),
    );

    let result = search("mit professor", None, &candidates);

    assert_eq!(ids(&result.entities), vec!["prof-johnson", "visiting"]);
    assert_eq!(result.total, 2);
    assert!(!result.has_more);
}

#[test]
fn empty_query_with_category_returns_products_by_name() {
    let filters = SearchFilters::new().with_category(Category::Products);
    let result = search("", Some(&filters), &mixed_catalog());

    assert_eq!(result.total, 5);
    assert!(result.entities.iter().all(|e| e.category == Category::Products));
    assert_eq!(
        names(&result.entities),
        vec!["Apple Watch", "Blender 3000", "kettle pro", "Mouse Pad", "Zen Headphones"]
    );
}

#[test]
fn nonsense_query_is_empty() {
    let result = search("xyz123nonexistent", None, &sample_catalog());
    assert_eq!(
        result,
        SearchResult {
            entities: vec![],
            total: 0,
            has_more: false
        }
    );
}

#[test]
fn rating_range_keeps_top_rated() {
    let candidates: Vec<Entity> = [3.0, 4.2, 4.6, 4.9, 5.0]
        .iter()
        .enumerate()
        .map(|(i, rating)| EntityBuilder::new(format!("r{i}"), format!("Rated {i}")).rating(*rating).build())
        .collect();
    let filters = SearchFilters::new().with_rating(Some(4.5), Some(5.0));

    let result = search("", Some(&filters), &candidates);

    assert_eq!(ids(&result.entities), vec!["r2", "r3", "r4"]);
}

#[test]
fn review_count_ascending_sort() {
    let candidates = vec![
        EntityBuilder::new("fifty", "Fifty").reviews(50).build(),
        EntityBuilder::new("five", "Five").reviews(5).build(),
        EntityBuilder::new("five-hundred", "Five Hundred").reviews(500).build(),
    ];
    let filters = SearchFilters::new().with_sort(SortBy::ReviewCount, SortOrder::Asc);

    let result = search("", Some(&filters), &candidates);

    let counts: Vec<u64> = result.entities.iter().map(Entity::reviews).collect();
    assert_eq!(counts, vec![5, 50, 500]);
}

#[test]
fn empty_query_without_filters_sorts_everything_by_name() {
    let result = search("   ", None, &mixed_catalog());
    assert_eq!(result.total, 8);
    assert_eq!(
        names(&result.entities),
        vec![
            "Acme Corp",
            "Apple Watch",
            "Blender 3000",
            "Central Park",
            "Dr. Jane Doe",
            "kettle pro",
            "Mouse Pad",
            "Zen Headphones",
        ]
    );
}

#[test]
fn empty_candidates_give_empty_result() {
    let filters = SearchFilters::new()
        .with_category(Category::Places)
        .with_sort(SortBy::Rating, SortOrder::Desc);
    assert_eq!(search("coffee", Some(&filters), &[]), SearchResult::empty());
}

#[test]
fn inputs_are_not_mutated() {
    let candidates = mixed_catalog();
    let before = candidates.clone();
    let filters = SearchFilters::new().with_sort(SortBy::Name, SortOrder::Desc);
    let _ = search("", Some(&filters), &candidates);
    assert_eq!(candidates, before);
}
