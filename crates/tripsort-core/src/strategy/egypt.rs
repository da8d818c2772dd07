//! Egyptian resorts, split into El Gouna, Hamata and everything else.

use super::{contains_any, is_one_of, RecordView};
use crate::catalog::VenueSet;
use crate::record::Category;

/// Soma Bay venues missing from the curated sets.
const SOMA_BAY_VENUES: &[&str] = &["soma bay", "palm royal", "sentido palm"];

const EGYPT_DESTINATIONS: &[&str] = &[
    "hrg",
    "rmf",
    "ssh",
    "soma bay",
    "egipt, hurghada",
    "egipt marsa alam",
    "egipt sharm el sheik",
    "egipt soma bay",
    "egipt",
    "hurghada",
    "marsa alam",
    "sharm el sheik",
    "egypt",
    "egypt, hurghada",
    "egypt hurghada",
    "egypt marsa alam",
    "egypt sharm el sheikh",
    "egypt soma bay",
    "sharm el sheikh",
];

#[derive(Debug, Clone, Default)]
pub struct EgyptStrategy {
    el_gouna: VenueSet,
    hamata: VenueSet,
    other: VenueSet,
}

impl EgyptStrategy {
    pub const PRIORITY: u32 = 10;

    pub fn new(el_gouna: VenueSet, hamata: VenueSet, other: VenueSet) -> Self {
        Self {
            el_gouna,
            hamata,
            other,
        }
    }

    /// Venue decides the region; an Egyptian destination with an
    /// unrecognised venue is claimed but left unassigned.
    fn resolve(&self, view: &RecordView<'_>) -> Option<Category> {
        let venue = view.venue;
        if contains_any(venue, SOMA_BAY_VENUES) {
            return Some(Category::EgyptOther);
        }
        if self.el_gouna.matches(venue) {
            return Some(Category::EgyptElGouna);
        }
        if self.hamata.matches(venue) {
            return Some(Category::EgyptHamata);
        }
        if self.other.matches(venue) {
            return Some(Category::EgyptOther);
        }
        if is_one_of(view.destination, EGYPT_DESTINATIONS) {
            return Some(Category::Unassigned);
        }
        None
    }

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        self.resolve(view).is_some()
    }

    pub fn classify(&self, view: &RecordView<'_>) -> Category {
        self.resolve(view).unwrap_or_default()
    }
}
