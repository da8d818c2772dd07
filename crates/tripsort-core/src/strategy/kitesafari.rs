//! Boat-based kite safaris.

use super::{contains_any, RecordView};
use crate::record::Category;

const KEYWORDS: &[&str] = &[
    "kite safari",
    "kitesafari",
    "aml hayaty",
    "valerie",
    "jacht motorowy",
    "jacht",
    "yacht",
    "m/y ",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KitesafariStrategy;

impl KitesafariStrategy {
    pub const PRIORITY: u32 = 9;

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        // Brazil Kite Safari is a land tour, counted under Brazil
        if view.venue.contains("brazil") {
            return false;
        }
        contains_any(view.venue, KEYWORDS) || view.destination == "kitesafari"
    }

    pub fn classify(&self, _view: &RecordView<'_>) -> Category {
        Category::Kitesafari
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(venue: &str, destination: &str) -> bool {
        KitesafariStrategy.can_handle(&RecordView::from_normalized(venue, destination))
    }

    #[test]
    fn test_boats_and_safaris() {
        assert!(handles("kitesafari m/y valerie", "egipt"));
        assert!(handles("jacht motorowy", ""));
        assert!(handles("motor yacht blue", ""));
        assert!(handles("aml hayaty", "hurghada"));
        assert!(handles("", "kitesafari"));
        assert!(handles("m/y blue pearl", "egipt"));
    }

    #[test]
    fn test_brazil_is_excluded() {
        assert!(!handles("brazil kite safari", "brazylia"));
    }

    #[test]
    fn test_hotels_are_not_safaris() {
        assert!(!handles("three corners ocean view", "hurghada"));
    }
}
