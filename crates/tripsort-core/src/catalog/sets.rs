//! Curated venue sets per region, loaded from `category_sets.json`.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TripsortError};

/// Ordered list of canonical venue names.
///
/// Matching is by substring against the normalized venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueSet(Vec<String>);

impl VenueSet {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_raw(names.iter().map(|s| s.as_ref().to_string()).collect()).0
    }

    /// Trim, lowercase and drop empty names. Returns the set and the
    /// number of dropped entries.
    fn from_raw(raw: Vec<String>) -> (Self, usize) {
        let before = raw.len();
        let names: Vec<String> = raw
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let dropped = before - names.len();
        (Self(names), dropped)
    }

    /// True if any curated name occurs in the venue.
    pub fn matches(&self, venue: &str) -> bool {
        self.0.iter().any(|name| venue.contains(name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct CategorySetFile {
    #[serde(default)]
    el_gouna_hotels: Vec<String>,
    #[serde(default)]
    hamata_hotels: Vec<String>,
    #[serde(default)]
    egypt_other_hotels: Vec<String>,
    #[serde(default)]
    greece_limnos_hotels: Vec<String>,
    #[serde(default, alias = "greece_rodos_hotels")]
    greece_rhodes_hotels: Vec<String>,
    #[serde(default)]
    greece_other_hotels: Vec<String>,
    #[serde(default)]
    turkey_hotels: Vec<String>,
    #[serde(default)]
    sal_hotels: Vec<String>,
    #[serde(default)]
    fuerteventura_hotels: Vec<String>,
    #[serde(default)]
    exotic_destinations: Vec<String>,
}

/// All curated sets used by the regional strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySets {
    pub el_gouna: VenueSet,
    pub hamata: VenueSet,
    pub egypt_other: VenueSet,
    pub greece_limnos: VenueSet,
    pub greece_rhodes: VenueSet,
    pub greece_other: VenueSet,
    pub turkey: VenueSet,
    pub sal: VenueSet,
    pub fuerteventura: VenueSet,
    /// Matched by equality with the normalized destination
    pub exotic_destinations: BTreeSet<String>,
}

impl CategorySets {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let file: CategorySetFile =
            serde_json::from_str(content).map_err(|e| TripsortError::ConfigMalformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut dropped = 0usize;
        let mut take = |raw: Vec<String>| {
            let (set, n) = VenueSet::from_raw(raw);
            dropped += n;
            set
        };

        let sets = Self {
            el_gouna: take(file.el_gouna_hotels),
            hamata: take(file.hamata_hotels),
            egypt_other: take(file.egypt_other_hotels),
            greece_limnos: take(file.greece_limnos_hotels),
            greece_rhodes: take(file.greece_rhodes_hotels),
            greece_other: take(file.greece_other_hotels),
            turkey: take(file.turkey_hotels),
            sal: take(file.sal_hotels),
            fuerteventura: take(file.fuerteventura_hotels),
            exotic_destinations: file
                .exotic_destinations
                .into_iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        };

        if dropped > 0 {
            tracing::warn!(path = %path.display(), dropped, "dropped empty venue names");
        }
        Ok(sets)
    }

    /// Total number of curated entries.
    pub fn total(&self) -> usize {
        [
            &self.el_gouna,
            &self.hamata,
            &self.egypt_other,
            &self.greece_limnos,
            &self.greece_rhodes,
            &self.greece_other,
            &self.turkey,
            &self.sal,
            &self.fuerteventura,
        ]
        .iter()
        .map(|s| s.len())
        .sum::<usize>()
            + self.exotic_destinations.len()
    }
}
