//! Multi-field artist filtering used by the browse and dashboard views.

use serde::{Deserialize, Serialize};

use crate::domain::artist::Artist;

/// Constraints applied to the artist collection.
///
/// An empty field places no constraint on the corresponding artist field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub category: String,
    pub location: String,
    pub price_range: String,
    pub search_term: String,
}

impl FilterCriteria {
    /// criteria constraining only the free-text search term
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_price_range(mut self, price_range: impl Into<String>) -> Self {
        self.price_range = price_range.into();
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// number of fields that constrain the result
    pub fn active_count(&self) -> usize {
        [
            &self.category,
            &self.location,
            &self.price_range,
            &self.search_term,
        ]
        .into_iter()
        .filter(|f| !f.is_empty())
        .count()
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Returns true when the artist satisfies every non-empty field of the criteria.
///
/// Category, location and search term are case-insensitive substring matches.
/// Price range is compared for exact equality.
pub fn matches(artist: &Artist, criteria: &FilterCriteria) -> bool {
    let category = criteria.category.to_lowercase();
    let location = criteria.location.to_lowercase();
    let term = criteria.search_term.to_lowercase();

    let matches_category =
        category.is_empty() || artist.category.iter().any(|c| contains_ci(c, &category));

    let matches_location = location.is_empty() || contains_ci(&artist.location, &location);

    let matches_price_range =
        criteria.price_range.is_empty() || artist.price_range == criteria.price_range;

    let matches_search = term.is_empty()
        || contains_ci(&artist.name, &term)
        || contains_ci(&artist.bio, &term)
        || artist.category.iter().any(|c| contains_ci(c, &term));

    matches_category && matches_location && matches_price_range && matches_search
}

/// Order-preserving subset of `artists` matching `criteria`.
pub fn filter<'a>(artists: &'a [Artist], criteria: &FilterCriteria) -> Vec<&'a Artist> {
    artists.iter().filter(|a| matches(a, criteria)).collect()
}
