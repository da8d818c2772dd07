//! Flight-only bookings: tickets, instructor tickets and route codes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{contains_any, is_one_of, RecordView};
use crate::catalog::PatternSet;
use crate::record::Category;

/// Values the alias tables map ticket-only bookings to.
pub(crate) const FLIGHT_SENTINELS: &[&str] = &["przelot", "flight"];

/// Venues that mention a route or the word "flight" but are not flights.
const NOT_FLIGHTS: &[&str] = &[
    "jacht motorowy",
    "valerie",
    "noclegi",
    "accommodation",
    "jacht",
    "yacht",
    "brazil kite safari",
    "riu creole",
    "bez przelotu",
    "no flight",
    "without flight",
    "yalla kite",
];

const TICKET_WORDS: &[&str] = &["bilet", "ticket"];
const INSTRUCTOR_WORDS: &[&str] = &["instruktor", "instructor"];

/// City-to-city routes, including common misspellings of Hurghada.
static CITY_ROUTES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"katowice.*hurgh",
        r"warszawa.*hurgh",
        r"warsaw.*hurgh",
        r"gdansk.*hurgh",
        r"wro.*hurgh",
        r"krakow.*hurgh",
        r"poznan.*hurgh",
        r"hurgh.*katowice",
        r"hurgh.*warszawa",
        r"hurgh.*warsaw",
        r"hurgh.*gdansk",
        r"hurgh.*wro",
        r"hurgh.*krakow",
        r"hurgh.*poznan",
        r"marsa.*alam.*wro",
        r"marsa.*alam.*warszawa",
        r"marsa.*alam.*katowice",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("city route pattern"))
    .collect()
});

#[derive(Debug, Clone, Default)]
pub struct FlightStrategy {
    patterns: PatternSet,
}

impl FlightStrategy {
    pub const PRIORITY: u32 = 4;

    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        let (venue, destination) = (view.venue, view.destination);

        if is_one_of(venue, FLIGHT_SENTINELS) {
            return true;
        }
        if contains_any(venue, NOT_FLIGHTS) {
            return false;
        }

        // a kitesafari is only a flight when it is explicitly an air ticket
        if (venue.contains("kitesafari") || venue.contains("kite safari"))
            && !is_explicit_air_ticket(venue)
        {
            return false;
        }

        if contains_any(venue, TICKET_WORDS) || contains_any(destination, TICKET_WORDS) {
            return true;
        }
        if contains_any(venue, INSTRUCTOR_WORDS) || contains_any(destination, INSTRUCTOR_WORDS) {
            return true;
        }
        if contains_any(venue, FLIGHT_SENTINELS) || contains_any(destination, FLIGHT_SENTINELS) {
            return true;
        }

        // raw text first: normalization drops the hyphens route codes rely on
        if self.patterns.matches_flight(&view.raw_venue)
            || self.patterns.matches_flight(&view.raw_destination)
        {
            return true;
        }
        if self.patterns.matches_flight(venue) || self.patterns.matches_flight(destination) {
            return true;
        }

        if venue.contains("waw") && venue.contains("hrg") {
            return true;
        }
        if venue.contains("kat") && venue.contains("hrg") {
            return true;
        }

        CITY_ROUTES
            .iter()
            .any(|re| re.is_match(venue) || re.is_match(destination))
    }

    pub fn classify(&self, _view: &RecordView<'_>) -> Category {
        Category::FlightOnly
    }
}

fn is_explicit_air_ticket(venue: &str) -> bool {
    venue.contains("bilet lot")
        || venue.contains("flight ticket")
        || (venue.contains("lot")
            && (venue.contains("kat-") || venue.contains("waw-") || venue.contains("-hrg-")))
}
