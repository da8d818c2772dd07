//! Category Classifier
//!
//! Runs a normalized record through three stages, each terminal on the
//! first hit:
//!
//! 1. pre-chain overrides for unknown venues
//! 2. the strategy chain, lowest priority number first
//! 3. the fallback decision tree
//!
//! Every path ends in a category; `Unassigned` absorbs whatever is left.

use serde::Serialize;

use crate::catalog::RuleSet;
use crate::record::{Category, Record};
use crate::strategy::{build_chain, contains_any, is_one_of, RecordView, Strategy, StrategyKind};

/// Normalized venue values meaning "no venue recorded".
const UNKNOWN_VENUES: &[&str] = &["", "n/a", "nan"];

/// Destinations that are Unassigned outright when the venue is unknown.
const HURGHADA_ALIASES: &[&str] = &["hrg", "hurghada", "egipt, hurghada", "egypt, hurghada"];

/// Destinations that still go through the chain with an unknown venue.
const UNKNOWN_VENUE_ALLOWED: &[&str] = &["kitesafari", "polisa", "policy"];

const CANCELLATION_WORDS: &[&str] = &[
    "rezygnacja",
    "skrocenie",
    "skrócenie",
    "cancellation",
    "cancelled",
    "trip shortening",
];

const SKI_WORDS: &[&str] = &["narty", "skiing"];
const SKI_DESTINATION: &str = "austria";

const VOUCHER_WORDS: &[&str] = &[
    "voucher",
    "vocher",
    "prezentowy",
    "bezterminowy",
    "gift card",
    "gift certificate",
];

/// Voucher bookings carrying any of these are prepaid lessons.
const VOUCHER_TRAINING_WORDS: &[&str] = &[
    "kurs",
    "szkolenie",
    "lekcj",
    "godzinn",
    "ind",
    "premium",
    "standard",
    "course",
    "training",
    "lesson",
];

const NOT_A_BOOKING_VENUES: &[&str] = &["test", "n/a"];
const APARTMENT_WORDS: &[&str] = &["apartament", "apartment"];

const INSURANCE_WORDS: &[&str] = &[
    "polisa",
    "polisy",
    "polisę",
    "polisą",
    "polisie",
    "polis",
    "ubezp",
    "ubezpieczenie",
    "ubezpieczenia",
    "sporty wyczynowo",
    "filipiny",
    "wietnam",
    "tajlandia",
    "3 polisy",
    "ubkr",
    "insurance",
    "policy",
];

const DISALLOWED_DESTINATIONS: &[&str] = &[
    "nieznany",
    "unknown",
    "voucher",
    "kurs",
    "wynajem sprzętu",
    "wynajem sprzetu",
];

const EMPTY_VALUES: &[&str] = &["", "nan", "none", "brak"];

/// Fallback tree steps, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStep {
    Cancellation,
    Ski,
    Voucher,
    NotABooking,
    Insurance,
    DisallowedDestination,
    EmptyVenue,
    Default,
}

/// Where a classification was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PreChain,
    Strategy(StrategyKind),
    Fallback(FallbackStep),
}

/// Full account of one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub stage: Stage,
    /// Every strategy whose `can_handle` accepted the record, in chain order
    pub eligible: Vec<StrategyKind>,
}

impl Classification {
    /// More than one strategy wanted the record.
    pub fn is_ambiguous(&self) -> bool {
        self.eligible.len() > 1
    }
}

/// Priority-ordered classifier over one rule set.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    strategies: Vec<Strategy>,
}

impl CategoryClassifier {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            strategies: build_chain(rules),
        }
    }

    /// Strategies in evaluation order.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Classify an already normalized record.
    pub fn classify(&self, record: &Record) -> Category {
        let view = RecordView::of(record);

        if let Some(category) = pre_chain(&view) {
            return category;
        }

        let Some(position) = self.strategies.iter().position(|s| s.can_handle(&view)) else {
            return fallback(&view).0;
        };
        let winner = &self.strategies[position];

        if tracing::enabled!(tracing::Level::DEBUG) {
            let also: Vec<StrategyKind> = self.strategies[position + 1..]
                .iter()
                .filter(|s| s.can_handle(&view))
                .map(Strategy::kind)
                .collect();
            if !also.is_empty() {
                tracing::debug!(
                    venue = view.venue,
                    destination = view.destination,
                    winner = %winner.kind(),
                    also = ?also,
                    "ambiguous record resolved by priority"
                );
            }
        }

        winner.classify(&view)
    }

    /// Classify and report the deciding stage and all eligible strategies.
    pub fn explain(&self, record: &Record) -> Classification {
        let view = RecordView::of(record);
        let eligible: Vec<StrategyKind> = self
            .strategies
            .iter()
            .filter(|s| s.can_handle(&view))
            .map(Strategy::kind)
            .collect();

        if let Some(category) = pre_chain(&view) {
            return Classification {
                category,
                stage: Stage::PreChain,
                eligible,
            };
        }

        if let Some(winner) = self.strategies.iter().find(|s| s.can_handle(&view)) {
            return Classification {
                category: winner.classify(&view),
                stage: Stage::Strategy(winner.kind()),
                eligible,
            };
        }

        let (category, step) = fallback(&view);
        Classification {
            category,
            stage: Stage::Fallback(step),
            eligible,
        }
    }
}

/// Unknown-venue overrides, evaluated before any strategy.
fn pre_chain(view: &RecordView<'_>) -> Option<Category> {
    if !is_one_of(view.venue, UNKNOWN_VENUES) {
        return None;
    }
    if is_one_of(view.destination, HURGHADA_ALIASES) {
        return Some(Category::Unassigned);
    }
    if !is_one_of(view.destination, UNKNOWN_VENUE_ALLOWED) {
        return Some(Category::Unassigned);
    }
    None
}

/// Last-resort heuristics for records no strategy claimed.
fn fallback(view: &RecordView<'_>) -> (Category, FallbackStep) {
    let (venue, destination) = (view.venue, view.destination);

    if contains_any(venue, CANCELLATION_WORDS) || contains_any(destination, CANCELLATION_WORDS) {
        return (Category::Unassigned, FallbackStep::Cancellation);
    }

    if contains_any(venue, SKI_WORDS) || destination == SKI_DESTINATION {
        return (Category::Ski, FallbackStep::Ski);
    }

    if contains_any(venue, VOUCHER_WORDS) && !contains_any(venue, VOUCHER_TRAINING_WORDS) {
        return (Category::Voucher, FallbackStep::Voucher);
    }

    if contains_any(venue, APARTMENT_WORDS)
        || is_one_of(venue, NOT_A_BOOKING_VENUES)
        || venue.is_empty()
    {
        return (Category::Unassigned, FallbackStep::NotABooking);
    }

    if contains_any(venue, INSURANCE_WORDS) || contains_any(destination, INSURANCE_WORDS) {
        return (Category::Insurance, FallbackStep::Insurance);
    }

    if is_one_of(destination, DISALLOWED_DESTINATIONS) {
        return (Category::Unassigned, FallbackStep::DisallowedDestination);
    }

    let venue_empty = is_one_of(&venue.to_lowercase(), EMPTY_VALUES);
    let destination_present = !is_one_of(&destination.to_lowercase(), EMPTY_VALUES);
    if venue_empty && destination_present {
        return (Category::Unassigned, FallbackStep::EmptyVenue);
    }

    (Category::Unassigned, FallbackStep::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategorySets, VenueSet};

    fn classifier() -> CategoryClassifier {
        let rules = RuleSet {
            category_sets: CategorySets {
                greece_limnos: VenueSet::new(&["porto myrina"]),
                exotic_destinations: ["sri lanka".to_string()].into_iter().collect(),
                ..CategorySets::default()
            },
            ..RuleSet::default()
        };
        CategoryClassifier::new(&rules)
    }

    fn normalized(venue: &str, destination: &str) -> Record {
        let mut record = Record::new(venue, destination);
        record.venue_normalized = venue.to_string();
        record.destination_normalized = destination.to_string();
        record
    }

    fn explain(venue: &str, destination: &str) -> Classification {
        classifier().explain(&normalized(venue, destination))
    }

    #[test]
    fn test_unknown_venue_short_circuits_before_greece() {
        let result = explain("", "limnos");
        assert_eq!(result.category, Category::Unassigned);
        assert_eq!(result.stage, Stage::PreChain);
        // Greece would have taken it
        assert_eq!(result.eligible, vec![StrategyKind::Greece]);
    }

    #[test]
    fn test_unknown_venue_with_hurghada() {
        assert_eq!(explain("nan", "hurghada").stage, Stage::PreChain);
        assert_eq!(explain("n/a", "hrg").category, Category::Unassigned);
    }

    #[test]
    fn test_unknown_venue_allowed_destinations_reach_chain() {
        let result = explain("nan", "kitesafari");
        assert_eq!(result.category, Category::Kitesafari);
        assert_eq!(result.stage, Stage::Strategy(StrategyKind::Kitesafari));

        let result = explain("nan", "polisa");
        assert_eq!(result.category, Category::Insurance);
    }

    #[test]
    fn test_priority_beats_later_strategies() {
        let result = explain("kurs kitesurfingu", "limnos");
        assert_eq!(result.category, Category::Training);
        assert_eq!(
            result.eligible,
            vec![StrategyKind::Training, StrategyKind::Greece]
        );
        assert!(result.is_ambiguous());

        let record = normalized("kurs kitesurfingu", "limnos");
        assert_eq!(classifier().classify(&record), Category::Training);
    }

    #[test]
    fn test_fallback_steps_in_order() {
        let cases = [
            ("rezygnacja z wyjazdu", "islandia", Category::Unassigned, FallbackStep::Cancellation),
            ("narty zillertal", "islandia", Category::Ski, FallbackStep::Ski),
            ("chalet", "austria", Category::Ski, FallbackStep::Ski),
            ("voucher prezentowy", "", Category::Voucher, FallbackStep::Voucher),
            ("apartament centrum", "islandia", Category::Unassigned, FallbackStep::NotABooking),
            ("test", "islandia", Category::Unassigned, FallbackStep::NotABooking),
            ("hotel reykjavik", "wietnam", Category::Insurance, FallbackStep::Insurance),
            ("hotel reykjavik", "nieznany", Category::Unassigned, FallbackStep::DisallowedDestination),
            ("none", "islandia", Category::Unassigned, FallbackStep::EmptyVenue),
            ("hotel reykjavik", "islandia", Category::Unassigned, FallbackStep::Default),
        ];
        for (venue, destination, category, step) in cases {
            let result = explain(venue, destination);
            assert_eq!(result.category, category, "{venue} / {destination}");
            assert_eq!(result.stage, Stage::Fallback(step), "{venue} / {destination}");
        }
    }

    #[test]
    fn test_voucher_for_lessons_is_not_a_voucher() {
        let result = explain("voucher standard", "islandia");
        assert_ne!(result.category, Category::Voucher);
    }

    #[test]
    fn test_classify_matches_explain() {
        let c = classifier();
        for (venue, destination) in [
            ("", "limnos"),
            ("porto myrina", ""),
            ("paje lodge", "sri lanka"),
            ("przelot", "egipt"),
            ("hotel reykjavik", "islandia"),
            ("voucher", ""),
        ] {
            let record = normalized(venue, destination);
            assert_eq!(c.classify(&record), c.explain(&record).category);
        }
    }
}
