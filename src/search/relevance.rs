//! Relevance ordering of the matched set.
//!
//! Entities whose restricted text contains the whole query come first; all
//! remaining ties fall back to a locale-aware name comparison.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::core::Entity;

use super::matcher::restricted_search_text;
use super::query::NormalizedQuery;

/// Compare two display strings the way a collating UI would: base letters
/// first (accents and case folded away), then accents, then lowercase before
/// uppercase.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_cmp(a, b))
}

/// Base letters with accents and case folded away. Each character is ranked
/// by class first so punctuation and symbols sort before digits, and digits
/// before letters.
fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
        .collect()
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_cmp(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        match (ca.is_uppercase(), cb.is_uppercase()) {
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            _ => {}
        }
    }
    a.cmp(b)
}

/// Sort matched entities into relevance order. Stable.
pub fn sort_by_relevance(entities: &mut [&Entity], query: &NormalizedQuery) {
    // Exactness is computed once per entity rather than per comparison.
    let mut keyed: Vec<(bool, &Entity)> = entities
        .iter()
        .map(|entity| (is_exact(entity, query), *entity))
        .collect();

    keyed.sort_by(|(a_exact, a), (b_exact, b)| match (a_exact, b_exact) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => locale_cmp(&a.name, &b.name),
    });

    for (slot, (_, entity)) in entities.iter_mut().zip(keyed) {
        *slot = entity;
    }
}

fn is_exact(entity: &Entity, query: &NormalizedQuery) -> bool {
    !query.is_empty() && restricted_search_text(entity).contains(query.text.as_str())
}
