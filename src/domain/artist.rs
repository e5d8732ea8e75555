use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Represents a bookable performer profile.
///
/// Records come from the catalog fixture and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub category: Vec<String>,
    pub bio: String,
    pub price_range: String,
    pub location: String,
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub rating: f64,
    pub experience: String,
    pub availability: Availability,
}

impl Artist {
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
}

impl Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::Busy => write!(f, "Busy"),
        }
    }
}

#[cfg(test)]
pub(crate) fn mock_artist(id: &str, name: &str, category: &[&str], location: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        category: category.iter().map(|c| c.to_string()).collect(),
        bio: format!("{name} performs at weddings and corporate events."),
        price_range: "₹25,000 - ₹50,000".to_string(),
        location: location.to_string(),
        languages: vec!["English".to_string()],
        profile_image: None,
        rating: 4.5,
        experience: "5 years".to_string(),
        availability: Availability::Available,
    }
}
