use proptest::prelude::*;

use entity_search::core::{Category, Entity, EntityContext};
use entity_search::search::{
    MatchKind, Matcher, NormalizedQuery, QueryCache, RatingRange, SearchEngine, SearchFilters,
    SortBy, SortOrder, full_search_text, restricted_search_text, partial_threshold, search,
};

const WORDS: &[&str] = &[
    "coffee", "mit", "professor", "pizza", "bank", "park", "phone", "clinic", "boston", "cafe",
];

fn arb_word() -> impl Strategy<Value = String> {
    prop::sample::select(WORDS).prop_map(str::to_string)
}

fn arb_phrase(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 1..=max_words).prop_map(|words| words.join(" "))
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_entity() -> impl Strategy<Value = Entity> {
    (
        arb_phrase(3),
        prop::option::of(arb_phrase(4)),
        prop::option::of(arb_word()),
        prop::option::of(arb_word()),
        prop::option::of(arb_word()),
        arb_category(),
        prop::option::of(0u32..=50),
        prop::option::of(0u64..1000),
        any::<bool>(),
    )
        .prop_map(
            |(name, description, organization, location, subcategory, category, rating, reviews, verified)| {
                let mut entity = Entity::new(String::new(), name, category);
                entity.description = description;
                if organization.is_some() || location.is_some() {
                    entity.context = Some(EntityContext {
                        organization,
                        location,
                        ..EntityContext::default()
                    });
                }
                entity.subcategory = subcategory;
                entity.average_rating = rating.map(|r| f64::from(r) / 10.0);
                entity.review_count = reviews;
                entity.is_verified = verified;
                entity
            },
        )
}

fn arb_candidates() -> impl Strategy<Value = Vec<Entity>> {
    prop::collection::vec(arb_entity(), 0..24).prop_map(|mut entities| {
        for (i, entity) in entities.iter_mut().enumerate() {
            entity.id = format!("e{i}");
        }
        entities
    })
}

fn arb_sort_by() -> impl Strategy<Value = SortBy> {
    prop::sample::select(vec![
        SortBy::Name,
        SortBy::Rating,
        SortBy::ReviewCount,
        SortBy::CreatedAt,
        SortBy::Unknown,
    ])
}

fn arb_filters() -> impl Strategy<Value = SearchFilters> {
    (
        prop::option::of(arb_category()),
        prop::option::of((prop::option::of(0u32..=50), prop::option::of(0u32..=50))),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(arb_sort_by()),
        prop::option::of(prop::sample::select(vec![SortOrder::Asc, SortOrder::Desc])),
    )
        .prop_map(|(category, rating, verified, has_reviews, sort_by, sort_order)| SearchFilters {
            category,
            rating: rating.map(|(min, max)| {
                RatingRange::new(
                    min.map(|v| f64::from(v) / 10.0),
                    max.map(|v| f64::from(v) / 10.0),
                )
            }),
            verified,
            has_reviews,
            sort_by,
            sort_order,
        })
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), arb_phrase(4)]
}

proptest! {
    #[test]
    fn search_is_idempotent(query in arb_query(), filters in arb_filters(), candidates in arb_candidates()) {
        let first = search(&query, Some(&filters), &candidates);
        let second = search(&query, Some(&filters), &candidates);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn filtering_never_grows_the_matched_set(query in arb_query(), filters in arb_filters(), candidates in arb_candidates()) {
        let matched = search(&query, None, &candidates);
        let filtered = search(&query, Some(&filters), &candidates);
        prop_assert!(filtered.total <= matched.total);
        for entity in &filtered.entities {
            prop_assert!(matched.entities.contains(entity));
        }
    }

    #[test]
    fn total_matches_entity_count(query in arb_query(), filters in arb_filters(), candidates in arb_candidates()) {
        let result = search(&query, Some(&filters), &candidates);
        prop_assert_eq!(result.total, result.entities.len());
        prop_assert!(!result.has_more);
    }

    #[test]
    fn exact_matches_precede_non_exact(query in arb_phrase(2), candidates in arb_candidates()) {
        let result = search(&query, None, &candidates);
        let normalized = NormalizedQuery::parse(&query);
        let exact: Vec<bool> = result
            .entities
            .iter()
            .map(|e| restricted_search_text(e).contains(normalized.text.as_str()))
            .collect();
        if let Some(first_non_exact) = exact.iter().position(|is_exact| !is_exact) {
            prop_assert!(exact[first_non_exact..].iter().all(|is_exact| !is_exact));
        }
    }

    #[test]
    fn all_tokens_present_means_included(query in arb_phrase(4), candidates in arb_candidates()) {
        let normalized = NormalizedQuery::parse(&query);
        let result = search(&query, None, &candidates);
        for entity in &candidates {
            let text = full_search_text(entity);
            if normalized.tokens.iter().all(|t| text.contains(t.as_str())) {
                prop_assert!(result.entities.iter().any(|e| e.id == entity.id));
            }
        }
    }

    #[test]
    fn single_token_never_partial(word in arb_word(), entity in arb_entity()) {
        let query = NormalizedQuery::parse(&word);
        let kind = Matcher::new(&query, 0.5).classify(&entity);
        prop_assert_ne!(kind, Some(MatchKind::Partial));
    }

    #[test]
    fn rating_desc_is_non_increasing(query in arb_query(), candidates in arb_candidates()) {
        let filters = SearchFilters::new().with_sort(SortBy::Rating, SortOrder::Desc);
        let result = search(&query, Some(&filters), &candidates);
        for pair in result.entities.windows(2) {
            prop_assert!(pair[0].rating() >= pair[1].rating());
        }
    }

    #[test]
    fn review_count_asc_is_non_decreasing(query in arb_query(), candidates in arb_candidates()) {
        let filters = SearchFilters::new().with_sort(SortBy::ReviewCount, SortOrder::Asc);
        let result = search(&query, Some(&filters), &candidates);
        for pair in result.entities.windows(2) {
            prop_assert!(pair[0].reviews() <= pair[1].reviews());
        }
    }

    #[test]
    fn empty_query_without_filters_keeps_everything(candidates in arb_candidates()) {
        let result = search("", None, &candidates);
        prop_assert_eq!(result.total, candidates.len());
    }

    #[test]
    fn cached_engine_agrees_with_plain_search(query in arb_query(), filters in arb_filters(), candidates in arb_candidates()) {
        let engine = SearchEngine::default().with_cache(QueryCache::new(8));
        let fresh = search(&query, Some(&filters), &candidates);
        let miss = engine.search(&query, Some(&filters), &candidates);
        let hit = engine.search(&query, Some(&filters), &candidates);
        prop_assert_eq!(&fresh, &miss);
        prop_assert_eq!(&fresh, &hit);
    }

    #[test]
    fn partial_threshold_is_ceiling(tokens in 2usize..20, ratio_pct in 1u32..=100) {
        let ratio = f64::from(ratio_pct) / 100.0;
        let needed = partial_threshold(tokens, ratio);
        prop_assert!(needed >= 1 && needed <= tokens);
        #[allow(clippy::cast_precision_loss)]
        let exact = tokens as f64 * ratio;
        prop_assert!(needed as f64 >= exact - 1e-9);
        prop_assert!((needed as f64) < exact + 1.0);
    }
}
