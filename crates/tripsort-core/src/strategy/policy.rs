//! Insurance policies sold alongside (or instead of) a trip.

use super::{contains_any, is_one_of, RecordView};
use crate::record::Category;

/// Values the alias tables map insurance products to.
pub(crate) const POLICY_SENTINELS: &[&str] = &["polisa", "policy"];

/// Policy word forms and insurer names.
const PATTERNS: &[&str] = &[
    "polisa",
    "polisy",
    "polisę",
    "polisą",
    "polisie",
    "polis",
    "ubezpieczenie",
    "ubezpieczenia",
    "ubezp",
    "insurance",
    "policy",
    "kr",
    "allianz",
    "ergo",
    "mondial",
    "globtroter",
    "globtrotter",
    "wiener",
    "compensa",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyStrategy;

impl PolicyStrategy {
    pub const PRIORITY: u32 = 3;

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        let (venue, destination) = (view.venue, view.destination);

        if is_one_of(venue, POLICY_SENTINELS) || is_one_of(destination, POLICY_SENTINELS) {
            return true;
        }

        // policy bought for a long-haul trip booked elsewhere
        if contains_any(destination, &["japonia", "japan"])
            && contains_any(venue, &["polisa", "policy"])
        {
            return true;
        }

        if venue.contains("ubezpieczenie do wyjazdu") || venue.contains("travel insurance") {
            return true;
        }
        if venue.contains("polisa") && venue.contains("do wyjazdu") {
            return true;
        }
        if venue.contains("doplata do kontynuacji leczenia w rp") {
            return true;
        }
        // cancellation cover (KR) attached to air tickets
        if venue.contains("ubkr") && venue.contains("bilet") {
            return true;
        }
        if venue.contains("ubezpieczenie") && venue.contains("kr") && venue.contains("bilet") {
            return true;
        }
        if venue.contains("ubezpieczenie kr") {
            return true;
        }

        !venue.is_empty() && contains_any(venue, PATTERNS)
    }

    pub fn classify(&self, _view: &RecordView<'_>) -> Category {
        Category::Insurance
    }
}
