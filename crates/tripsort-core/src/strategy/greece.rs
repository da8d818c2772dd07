//! Greek islands. Limnos takes precedence over Rhodes, Rhodes over the rest.

use super::{contains_any, is_one_of, RecordView};
use crate::catalog::VenueSet;
use crate::record::Category;

const GREECE_DESTINATIONS: &[&str] = &[
    "lxs",
    "rho",
    "kos",
    "zth",
    "grecja, limnos",
    "grecja, rodos",
    "grecja rodos",
    "grecja korfu",
    "grecja kos",
    "grecja zakynthos",
    "limnos",
    "lemnos",
    "rodos",
    "rhodes",
    "korfu",
    "corfu",
    "zakynthos",
    "grecja",
    "greece",
];

const LIMNOS_DESTINATIONS: &[&str] = &["lxs", "grecja, limnos", "limnos", "lemnos"];

const RHODES_DESTINATIONS: &[&str] = &[
    "rho",
    "grecja, rodos",
    "grecja rodos",
    "rodos",
    "rhodes",
    "greece rhodes",
];

const OTHER_DESTINATIONS: &[&str] = &[
    "kos",
    "zakynthos",
    "zth",
    "korfu",
    "corfu",
    "grecja kos",
    "grecja zakynthos",
    "greece kos",
    "greece zakynthos",
    "greece corfu",
];

/// Known Greek hotels without a curated entry; booked on Rhodes.
const UNMAPPED_RHODES_HOTELS: &[&str] = &["ocean palace", "summer breeze"];

#[derive(Debug, Clone, Default)]
pub struct GreeceStrategy {
    limnos: VenueSet,
    rhodes: VenueSet,
    other: VenueSet,
}

impl GreeceStrategy {
    pub const PRIORITY: u32 = 11;

    pub fn new(limnos: VenueSet, rhodes: VenueSet, other: VenueSet) -> Self {
        Self {
            limnos,
            rhodes,
            other,
        }
    }

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        let destination = view.destination;
        if is_one_of(destination, GREECE_DESTINATIONS)
            || contains_any(destination, &["grecja", "greece"])
        {
            return true;
        }
        let venue = view.venue;
        self.limnos.matches(venue) || self.rhodes.matches(venue) || self.other.matches(venue)
    }

    pub fn classify(&self, view: &RecordView<'_>) -> Category {
        let (venue, destination) = (view.venue, view.destination);

        if is_one_of(destination, LIMNOS_DESTINATIONS)
            || contains_any(destination, &["limnos", "lemnos"])
            || self.limnos.matches(venue)
        {
            Category::GreeceLimnos
        } else if is_one_of(destination, RHODES_DESTINATIONS) || self.rhodes.matches(venue) {
            Category::GreeceRhodes
        } else if is_one_of(destination, OTHER_DESTINATIONS) || self.other.matches(venue) {
            Category::GreeceOther
        } else if contains_any(venue, UNMAPPED_RHODES_HOTELS) {
            Category::GreeceRhodes
        } else {
            Category::GreeceOther
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> GreeceStrategy {
        GreeceStrategy::new(
            VenueSet::new(&["lemnos village", "porto myrina"]),
            VenueSet::new(&["princess andriana"]),
            VenueSet::new(&["kos imperial"]),
        )
    }

    fn classify(venue: &str, destination: &str) -> Option<Category> {
        let s = strategy();
        let view = RecordView::from_normalized(venue, destination);
        s.can_handle(&view).then(|| s.classify(&view))
    }

    #[test]
    fn test_destination_drives_island() {
        assert_eq!(classify("any hotel", "limnos"), Some(Category::GreeceLimnos));
        assert_eq!(classify("any hotel", "grecja, limnos"), Some(Category::GreeceLimnos));
        assert_eq!(classify("any hotel", "rodos"), Some(Category::GreeceRhodes));
        assert_eq!(classify("any hotel", "zakynthos"), Some(Category::GreeceOther));
    }

    #[test]
    fn test_curated_venue_without_greek_destination() {
        assert_eq!(classify("porto myrina palace", ""), Some(Category::GreeceLimnos));
        assert_eq!(classify("princess andriana", "nan"), Some(Category::GreeceRhodes));
        assert_eq!(classify("kos imperial", ""), Some(Category::GreeceOther));
    }

    #[test]
    fn test_limnos_set_beats_rhodes_destination() {
        assert_eq!(classify("lemnos village", "rodos"), Some(Category::GreeceLimnos));
    }

    #[test]
    fn test_generic_greece_fallbacks() {
        assert_eq!(classify("ocean palace", "grecja"), Some(Category::GreeceRhodes));
        assert_eq!(classify("some taverna", "greece"), Some(Category::GreeceOther));
    }

    #[test]
    fn test_non_greek_records_are_ignored() {
        assert_eq!(classify("any hotel", "egipt"), None);
    }
}
