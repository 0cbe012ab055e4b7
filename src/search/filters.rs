//! Structured search filters.
//!
//! Each filter is an independent predicate; all present filters must hold.

use serde::{Deserialize, Serialize};

use crate::core::{Category, Entity};

use super::sort::{SortBy, SortOrder};

/// Rating scale used when a range bound is omitted.
pub const RATING_SCALE_MIN: f64 = 0.0;
pub const RATING_SCALE_MAX: f64 = 5.0;

/// Inclusive rating range; either bound may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RatingRange {
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Resolve omitted bounds against the given defaults.
    #[must_use]
    pub fn resolve(&self, defaults: RatingBounds) -> RatingBounds {
        RatingBounds {
            min: self.min.unwrap_or(defaults.min),
            max: self.max.unwrap_or(defaults.max),
        }
    }
}

/// Fully resolved inclusive rating bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for RatingBounds {
    fn default() -> Self {
        Self {
            min: RATING_SCALE_MIN,
            max: RATING_SCALE_MAX,
        }
    }
}

impl RatingBounds {
    #[must_use]
    pub fn contains(&self, rating: f64) -> bool {
        self.min <= rating && rating <= self.max
    }
}

/// Filters and ordering requested alongside a text query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl SearchFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.rating = Some(RatingRange::new(min, max));
        self
    }

    #[must_use]
    pub const fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    #[must_use]
    pub const fn with_has_reviews(mut self, has_reviews: bool) -> Self {
        self.has_reviews = Some(has_reviews);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = Some(sort_order);
        self
    }

    /// True when no filter narrows the set (sorting does not count).
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.rating.is_none()
            && self.verified.is_none()
            && !matches!(self.has_reviews, Some(true))
    }
}

/// One predicate of the filter pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Predicate {
    Category(Category),
    Rating(RatingBounds),
    Verified(bool),
    HasReviews,
}

impl Predicate {
    fn keep(&self, entity: &Entity) -> bool {
        match *self {
            Self::Category(category) => entity.category == category,
            Self::Rating(bounds) => bounds.contains(entity.rating()),
            Self::Verified(verified) => entity.is_verified == verified,
            Self::HasReviews => entity.reviews() > 0,
        }
    }
}

/// The AND-combined filter predicates derived from a `SearchFilters`.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    predicates: Vec<Predicate>,
}

impl FilterPipeline {
    /// Build the pipeline in its fixed order: category, rating, verified,
    /// has-reviews.
    #[must_use]
    pub fn from_filters(filters: &SearchFilters, rating_defaults: RatingBounds) -> Self {
        let mut predicates = Vec::with_capacity(4);
        if let Some(category) = filters.category {
            predicates.push(Predicate::Category(category));
        }
        if let Some(range) = filters.rating {
            predicates.push(Predicate::Rating(range.resolve(rating_defaults)));
        }
        if let Some(verified) = filters.verified {
            predicates.push(Predicate::Verified(verified));
        }
        // hasReviews=false imposes nothing.
        if filters.has_reviews == Some(true) {
            predicates.push(Predicate::HasReviews);
        }
        Self { predicates }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn keep(&self, entity: &Entity) -> bool {
        self.predicates.iter().all(|predicate| predicate.keep(entity))
    }

    /// Retain only entities passing every predicate, preserving order.
    pub fn apply(&self, entities: &mut Vec<&Entity>) {
        if self.is_empty() {
            return;
        }
        entities.retain(|entity| self.keep(entity));
    }
}
