//! Entity records as delivered by the platform's data store.
//!
//! Field names follow the platform's camelCase wire format so candidate
//! snapshots can be deserialized straight from API payloads.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EsError;

/// Top-level entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Professionals,
    Companies,
    Places,
    Products,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::Professionals,
        Self::Companies,
        Self::Places,
        Self::Products,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professionals => "PROFESSIONALS",
            Self::Companies => "COMPANIES",
            Self::Places => "PLACES",
            Self::Products => "PRODUCTS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                EsError::InvalidArgument(format!(
                    "unknown category {value} (expected professionals|companies|places|products)"
                ))
            })
    }
}

/// Structured context attached to an entity (employer, address, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Any further free-text context fields; carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A reviewable entity. Read-only input to the search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EntityContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "isClaimed")]
    pub is_verified: bool,
}

impl Entity {
    /// Create a minimal entity; optional fields start empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category,
            context: None,
            subcategory: None,
            average_rating: None,
            review_count: None,
            created_at: None,
            updated_at: None,
            is_verified: false,
        }
    }

    /// Average rating, reading an absent value as 0.
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }

    /// Review count, reading an absent value as 0.
    #[must_use]
    pub fn reviews(&self) -> u64 {
        self.review_count.unwrap_or(0)
    }

    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.context.as_ref()?.organization.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.context.as_ref()?.location.as_deref()
    }
}
