//! Lessons, courses, camps and the rentals sold as part of a course.

use super::{contains_any, is_one_of, RecordView};
use crate::record::Category;

/// Venue values the alias tables map training products to.
const TRAINING_SENTINELS: &[&str] = &["szkolenie", "training"];

/// Exotic venues whose names would otherwise trip the keyword list.
const EXOTIC_VENUES: &[&str] = &[
    "kitesurfing lanka",
    "surfing lanka",
    "sunsol punta blanca",
    "sea view room",
];

const KEYWORDS: &[&str] = &[
    "szkolenie",
    "szkolenia",
    "progress camp",
    "pro camp",
    "lekcje",
    "instruktor",
    "pakiet",
    "duży pakiet",
    "rescue pack",
    "resuce pack",
    "kurs",
    "indywidualne",
    "indyw",
    "ind.",
    "ind ",
    "ind x",
    "refresher",
    "refr.",
    "grupowo",
    "promo",
    "refresh",
    "yalla kite",
    "godzinn",
    " h ind",
    " h kitesurfing",
    "windsurfing",
    "opcja standard",
    "euro os",
    "wypozyczenie sprzetu na kitesafari",
    "wypozyczenie latawca",
    "wypsprz",
    "wyp sprz",
    "refresh wyp",
    "refresh+wyp",
    "procamp",
    "wypozyczenie sprzetu premium",
    "wypoz sprzetu standard",
    "wypozyczenie sprzetu standard",
    "training",
    "lesson",
    "course",
    "instructor",
    "premium equipment rental",
    "standard equipment rental",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingStrategy;

impl TrainingStrategy {
    pub const PRIORITY: u32 = 1;

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        let venue = view.venue;
        if is_one_of(venue, TRAINING_SENTINELS) {
            return true;
        }
        if contains_any(venue, EXOTIC_VENUES) || venue.contains("brazil kite safari") {
            return false;
        }
        contains_any(venue, KEYWORDS)
    }

    pub fn classify(&self, _view: &RecordView<'_>) -> Category {
        Category::Training
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(venue: &str) -> bool {
        TrainingStrategy.can_handle(&RecordView::from_normalized(venue, ""))
    }

    #[test]
    fn test_sentinel_and_keywords() {
        assert!(handles("szkolenie"));
        assert!(handles("training"));
        assert!(handles("kurs ikO level"));
        assert!(handles("premium equipment rental"));
        assert!(handles("wypozyczenie sprzetu premium"));
        assert!(handles("yalla kite"));
    }

    #[test]
    fn test_exotic_and_brazil_exclusions() {
        assert!(!handles("sea view room promo"));
        assert!(!handles("kitesurfing lanka kurs"));
        assert!(!handles("brazil kite safari pakiet"));
    }

    #[test]
    fn test_plain_hotel_is_not_training() {
        assert!(!handles("sentido palm royal soma bay"));
        assert!(!handles(""));
    }

    #[test]
    fn test_always_classifies_as_training() {
        let view = RecordView::from_normalized("kurs", "egipt");
        assert_eq!(TrainingStrategy.classify(&view), Category::Training);
    }
}
