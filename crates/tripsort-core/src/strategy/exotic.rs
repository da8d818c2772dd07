//! Long-haul destinations outside the regular product range.

use std::collections::BTreeSet;

use super::flight::FLIGHT_SENTINELS;
use super::policy::POLICY_SENTINELS;
use super::{contains_any, is_one_of, RecordView};
use crate::record::Category;

const EXOTIC_SENTINELS: &[&str] = &["egzotyka", "exotic"];

/// Venue words that mark a course booked for an exotic destination.
const TRAINING_WORDS: &[&str] = &[
    "kurs",
    "szkolenie",
    "lekcj",
    "promo",
    "ind",
    "course",
    "training",
    "lesson",
];

#[derive(Debug, Clone, Default)]
pub struct ExoticStrategy {
    destinations: BTreeSet<String>,
}

impl ExoticStrategy {
    pub const PRIORITY: u32 = 13;

    pub fn new(destinations: BTreeSet<String>) -> Self {
        Self { destinations }
    }

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        let (venue, destination) = (view.venue, view.destination);

        if is_one_of(venue, EXOTIC_SENTINELS) || is_one_of(destination, EXOTIC_SENTINELS) {
            return true;
        }

        // Cape Town room booked without a resort name
        if destination.contains("rpa")
            && destination.contains("cape town")
            && venue.contains("sea view room")
        {
            return true;
        }

        if self.destinations.contains(destination) {
            if is_one_of(venue, POLICY_SENTINELS) || is_one_of(venue, FLIGHT_SENTINELS) {
                return false;
            }
            return !contains_any(venue, TRAINING_WORDS);
        }

        false
    }

    pub fn classify(&self, _view: &RecordView<'_>) -> Category {
        Category::ExoticOther
    }
}
