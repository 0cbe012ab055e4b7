//! Explicit sort override.
//!
//! When a caller names a sort field, the filtered set is fully re-sorted by
//! that field, discarding relevance order. Each field has its own pure
//! comparator; an unrecognised field compares everything as equal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::error::EsError;

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Name,
    Rating,
    ReviewCount,
    CreatedAt,
    /// Any field name this engine does not know; leaves order untouched.
    #[serde(other)]
    Unknown,
}

impl SortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::ReviewCount => "reviewCount",
            Self::CreatedAt => "createdAt",
            Self::Unknown => "unknown",
        }
    }

    /// Comparator for this field, ascending.
    #[must_use]
    pub fn comparator(self) -> fn(&Entity, &Entity) -> Ordering {
        match self {
            Self::Name => compare_name,
            Self::Rating => compare_rating,
            Self::ReviewCount => compare_review_count,
            Self::CreatedAt => compare_created_at,
            Self::Unknown => compare_nothing,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = EsError;

    /// Parses known field names (camelCase or snake_case); anything else is
    /// `Unknown` rather than an error.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "name" => Self::Name,
            "rating" => Self::Rating,
            "reviewcount" => Self::ReviewCount,
            "createdat" => Self::CreatedAt,
            _ => Self::Unknown,
        })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = EsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(EsError::InvalidArgument(format!(
                "invalid sort order {value} (expected asc|desc)"
            ))),
        }
    }
}

fn compare_name(a: &Entity, b: &Entity) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn compare_rating(a: &Entity, b: &Entity) -> Ordering {
    a.rating().total_cmp(&b.rating())
}

fn compare_review_count(a: &Entity, b: &Entity) -> Ordering {
    a.reviews().cmp(&b.reviews())
}

fn compare_created_at(a: &Entity, b: &Entity) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

const fn compare_nothing(_: &Entity, _: &Entity) -> Ordering {
    Ordering::Equal
}

/// Stable re-sort of `entities` by `sort_by` in `order`.
pub fn sort_entities(entities: &mut [&Entity], sort_by: SortBy, order: SortOrder) {
    if sort_by == SortBy::Unknown {
        return;
    }
    let compare = sort_by.comparator();
    entities.sort_by(|a, b| order.apply(compare(a, b)));
}
