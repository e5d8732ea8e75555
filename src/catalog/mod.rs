use std::{collections::HashSet, path::Path};

use log::{debug, info};
use serde::Serialize;

use crate::{
    catalog::error::CatalogError,
    domain::{
        artist::{Artist, Availability},
        options::CATEGORIES,
    },
    filter::{self, FilterCriteria},
};

pub mod error;

const BUNDLED_FIXTURE: &str = include_str!("../../data/artists.json");

/// Immutable collection of artist records, loaded once at start.
#[derive(Debug, Clone)]
pub struct Catalog {
    artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub busy: usize,
    pub average_rating: f64,
}

impl CatalogStats {
    /// Average rating with one decimal place, as shown on the dashboard.
    ///
    /// Ties round away from zero: an average of 4.25 shows as "4.3".
    pub fn average_rating_display(&self) -> String {
        format!("{:.1}", (self.average_rating * 10.0).round() / 10.0)
    }
}

impl Catalog {
    /// the fixture compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_FIXTURE)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading artist fixture from {}", path.to_string_lossy());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let artists: Vec<Artist> = serde_json::from_str(json)?;
        Self::new(artists)
    }

    pub fn new(artists: Vec<Artist>) -> Result<Self, CatalogError> {
        Self::validate(&artists)?;
        debug!("Catalog contains {} artists", artists.len());
        Ok(Self { artists })
    }

    /// checks record invariants: non-empty category and language sets,
    /// rating within [0, 5], unique ids
    pub fn validate(artists: &[Artist]) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();

        for artist in artists {
            let invalid = |reason: &str| CatalogError::InvalidArtist {
                id: artist.id.clone(),
                reason: reason.to_string(),
            };

            if artist.category.is_empty() {
                return Err(invalid("no categories"));
            }
            if artist.languages.is_empty() {
                return Err(invalid("no languages"));
            }
            if !(0.0..=5.0).contains(&artist.rating) {
                return Err(invalid(&format!("rating {} out of range", artist.rating)));
            }
            if !seen.insert(artist.id.as_str()) {
                return Err(CatalogError::DuplicateId(artist.id.clone()));
            }
        }

        Ok(())
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn get(&self, id: &str) -> Result<&Artist, CatalogError> {
        self.artists
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::ArtistNotFound(id.to_string()))
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Artist> {
        filter::filter(&self.artists, criteria)
    }

    /// dashboard search: only the free-text term is constrained
    pub fn search(&self, term: &str) -> Vec<&Artist> {
        self.filter(&FilterCriteria::search(term))
    }

    pub fn stats(&self) -> CatalogStats {
        let total = self.artists.len();
        let available = self.artists.iter().filter(|a| a.is_available()).count();
        let busy = self
            .artists
            .iter()
            .filter(|a| a.availability == Availability::Busy)
            .count();
        let average_rating = if total == 0 {
            0.0
        } else {
            self.artists.iter().map(|a| a.rating).sum::<f64>() / total as f64
        };

        CatalogStats {
            total,
            available,
            busy,
            average_rating,
        }
    }

    /// number of artists tagged with each category of the options list
    pub fn category_counts(&self) -> Vec<(&'static str, usize)> {
        CATEGORIES
            .iter()
            .map(|category| {
                let count = self
                    .artists
                    .iter()
                    .filter(|a| a.category.iter().any(|c| c == category))
                    .count();
                (*category, count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artist::mock_artist;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_bundled_fixture_is_valid() -> anyhow::Result<()> {
        let catalog = Catalog::bundled()?;
        assert_eq!(catalog.artists().len(), 10);
        assert_eq!(catalog.get("1")?.name, "Asha Bhosle");
        Ok(())
    }

    #[test]
    fn test_bundled_stats() -> anyhow::Result<()> {
        let stats = Catalog::bundled()?.stats();

        assert_eq!(stats.total, 10);
        assert_eq!(stats.available, 7);
        assert_eq!(stats.busy, 3);
        assert!((stats.average_rating - 4.54).abs() < 1e-9);
        assert_eq!(stats.average_rating_display(), "4.5");

        Ok(())
    }

    #[test]
    fn test_average_rating_ties_round_up() -> anyhow::Result<()> {
        let mut a = mock_artist("1", "Asha", &["Singer"], "Mumbai");
        a.rating = 4.0;
        let mut b = mock_artist("2", "Nova", &["DJ"], "Delhi");
        b.rating = 4.5;

        let stats = Catalog::new(vec![a, b])?.stats();
        assert_eq!(stats.average_rating, 4.25);
        assert_eq!(stats.average_rating_display(), "4.3");

        Ok(())
    }

    #[test]
    fn test_empty_catalog_stats() -> anyhow::Result<()> {
        let stats = Catalog::new(vec![])?.stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, 0.0);
        Ok(())
    }

    #[test]
    fn test_get_unknown_artist() -> anyhow::Result<()> {
        let catalog = Catalog::bundled()?;
        assert!(matches!(
            catalog.get("404"),
            Err(CatalogError::ArtistNotFound(id)) if id == "404"
        ));
        Ok(())
    }

    #[test]
    fn test_rejects_empty_categories() {
        let mut artist = mock_artist("1", "Asha", &[], "Mumbai");
        artist.category.clear();
        assert!(matches!(
            Catalog::new(vec![artist]),
            Err(CatalogError::InvalidArtist { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_languages() {
        let mut artist = mock_artist("1", "Asha", &["Singer"], "Mumbai");
        artist.languages.clear();
        assert!(matches!(
            Catalog::new(vec![artist]),
            Err(CatalogError::InvalidArtist { .. })
        ));
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        let mut artist = mock_artist("1", "Asha", &["Singer"], "Mumbai");
        artist.rating = 5.5;
        assert!(Catalog::new(vec![artist]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let a = mock_artist("1", "Asha", &["Singer"], "Mumbai");
        let b = mock_artist("1", "Nova", &["DJ"], "Delhi");
        assert!(matches!(
            Catalog::new(vec![a, b]),
            Err(CatalogError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_from_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("artists.json");
        let artists = vec![mock_artist("a", "Asha", &["Singer"], "Mumbai")];
        fs::write(&path, serde_json::to_string(&artists)?)?;

        let catalog = Catalog::from_file(&path)?;
        assert_eq!(catalog.artists(), artists.as_slice());

        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let result = Catalog::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::Fs(_))));
    }

    #[test]
    fn test_search_only_constrains_term() -> anyhow::Result<()> {
        let catalog = Catalog::bundled()?;
        let found: Vec<&str> = catalog.search("dj").iter().map(|a| a.name.as_str()).collect();
        assert_eq!(found, vec!["DJ Nova", "Vikram Reddy"]);
        assert_eq!(catalog.search("").len(), 10);
        Ok(())
    }

    #[test]
    fn test_bundled_browse_scenario() -> anyhow::Result<()> {
        let catalog = Catalog::bundled()?;
        let criteria = FilterCriteria::default()
            .with_category("Dancer")
            .with_price_range("₹0 - ₹25,000");
        let found: Vec<&str> = catalog.filter(&criteria).iter().map(|a| a.name.as_str()).collect();
        assert_eq!(found, vec!["Nisha Patel"]);
        Ok(())
    }

    #[test]
    fn test_category_counts() -> anyhow::Result<()> {
        let counts = Catalog::bundled()?.category_counts();
        assert_eq!(counts.len(), CATEGORIES.len());
        assert!(counts.contains(&("Singer", 2)));
        assert!(counts.contains(&("Dancer", 3)));
        assert!(counts.contains(&("DJ", 2)));
        Ok(())
    }
}
