//! # Strategy Module
//!
//! Independent classification rules, each owning a slice of the taxonomy.
//!
//! Every strategy answers two questions about a normalized record:
//! `can_handle` (is this mine?) and `classify` (which of my categories?).
//! The classifier walks them in ascending [`StrategyKind::priority`]
//! order and stops at the first one that accepts the record.
//!
//! | Strategy   | Priority | Categories |
//! |------------|----------|------------|
//! | Training   | 1        | Training |
//! | Equipment  | 2        | Equipment |
//! | Policy     | 3        | Insurance |
//! | Flight     | 4        | Flight only |
//! | Kitesafari | 9        | Kitesafari |
//! | Egypt      | 10       | Egypt regions, Unassigned |
//! | Greece     | 11       | Greece regions |
//! | Countries  | 12       | single-country categories, Unassigned |
//! | Exotic     | 13       | Exotic – other |
//!
//! ```rust
//! use tripsort_core::catalog::RuleSet;
//! use tripsort_core::strategy::{build_chain, RecordView, StrategyKind};
//! use tripsort_core::Category;
//!
//! let chain = build_chain(&RuleSet::default());
//! let view = RecordView::from_normalized("yalla kite", "hurghada");
//! let first = chain.iter().find(|s| s.can_handle(&view)).unwrap();
//! assert_eq!(first.kind(), StrategyKind::Training);
//! assert_eq!(first.classify(&view), Category::Training);
//! ```

mod countries;
mod egypt;
mod equipment;
mod exotic;
mod flight;
mod greece;
mod kitesafari;
mod policy;
mod training;

use std::fmt;

use serde::Serialize;

use crate::catalog::RuleSet;
use crate::record::{Category, Record};

pub use countries::CountriesStrategy;
pub use egypt::EgyptStrategy;
pub use equipment::EquipmentStrategy;
pub use exotic::ExoticStrategy;
pub use flight::FlightStrategy;
pub use greece::GreeceStrategy;
pub use kitesafari::KitesafariStrategy;
pub use policy::PolicyStrategy;
pub use training::TrainingStrategy;

/// The fields strategies look at.
///
/// `venue`/`destination` are the normalized values; the `raw_*` fields are
/// the lowercased source text, used by pattern checks that must see
/// hyphens and digits.
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    pub venue: &'a str,
    pub destination: &'a str,
    pub raw_venue: String,
    pub raw_destination: String,
}

impl<'a> RecordView<'a> {
    pub fn of(record: &'a Record) -> Self {
        Self {
            venue: &record.venue_normalized,
            destination: &record.destination_normalized,
            raw_venue: record.venue.to_lowercase(),
            raw_destination: record.destination.to_lowercase(),
        }
    }

    /// View over already normalized values; raw text is taken to be the same.
    pub fn from_normalized(venue: &'a str, destination: &'a str) -> Self {
        Self {
            venue,
            destination,
            raw_venue: venue.to_lowercase(),
            raw_destination: destination.to_lowercase(),
        }
    }
}

/// True if any keyword occurs in the text.
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// True if the text equals one of the values.
pub(crate) fn is_one_of(text: &str, values: &[&str]) -> bool {
    values.contains(&text)
}

/// Identifies a strategy in logs and explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Training,
    Equipment,
    Policy,
    Flight,
    Kitesafari,
    Egypt,
    Greece,
    Countries,
    Exotic,
}

impl StrategyKind {
    /// Lower runs earlier.
    pub fn priority(&self) -> u32 {
        match self {
            Self::Training => TrainingStrategy::PRIORITY,
            Self::Equipment => EquipmentStrategy::PRIORITY,
            Self::Policy => PolicyStrategy::PRIORITY,
            Self::Flight => FlightStrategy::PRIORITY,
            Self::Kitesafari => KitesafariStrategy::PRIORITY,
            Self::Egypt => EgyptStrategy::PRIORITY,
            Self::Greece => GreeceStrategy::PRIORITY,
            Self::Countries => CountriesStrategy::PRIORITY,
            Self::Exotic => ExoticStrategy::PRIORITY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Equipment => "equipment",
            Self::Policy => "policy",
            Self::Flight => "flight",
            Self::Kitesafari => "kitesafari",
            Self::Egypt => "egypt",
            Self::Greece => "greece",
            Self::Countries => "countries",
            Self::Exotic => "exotic",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of classification strategies.
#[derive(Debug, Clone)]
pub enum Strategy {
    Training(TrainingStrategy),
    Equipment(EquipmentStrategy),
    Policy(PolicyStrategy),
    Flight(FlightStrategy),
    Kitesafari(KitesafariStrategy),
    Egypt(EgyptStrategy),
    Greece(GreeceStrategy),
    Countries(CountriesStrategy),
    Exotic(ExoticStrategy),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Training(_) => StrategyKind::Training,
            Self::Equipment(_) => StrategyKind::Equipment,
            Self::Policy(_) => StrategyKind::Policy,
            Self::Flight(_) => StrategyKind::Flight,
            Self::Kitesafari(_) => StrategyKind::Kitesafari,
            Self::Egypt(_) => StrategyKind::Egypt,
            Self::Greece(_) => StrategyKind::Greece,
            Self::Countries(_) => StrategyKind::Countries,
            Self::Exotic(_) => StrategyKind::Exotic,
        }
    }

    pub fn priority(&self) -> u32 {
        self.kind().priority()
    }

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        match self {
            Self::Training(s) => s.can_handle(view),
            Self::Equipment(s) => s.can_handle(view),
            Self::Policy(s) => s.can_handle(view),
            Self::Flight(s) => s.can_handle(view),
            Self::Kitesafari(s) => s.can_handle(view),
            Self::Egypt(s) => s.can_handle(view),
            Self::Greece(s) => s.can_handle(view),
            Self::Countries(s) => s.can_handle(view),
            Self::Exotic(s) => s.can_handle(view),
        }
    }

    pub fn classify(&self, view: &RecordView<'_>) -> Category {
        match self {
            Self::Training(s) => s.classify(view),
            Self::Equipment(s) => s.classify(view),
            Self::Policy(s) => s.classify(view),
            Self::Flight(s) => s.classify(view),
            Self::Kitesafari(s) => s.classify(view),
            Self::Egypt(s) => s.classify(view),
            Self::Greece(s) => s.classify(view),
            Self::Countries(s) => s.classify(view),
            Self::Exotic(s) => s.classify(view),
        }
    }
}

/// Build every strategy from one rule set, sorted by priority.
///
/// The sort is stable, so strategies sharing a priority keep the
/// declaration order below.
pub fn build_chain(rules: &RuleSet) -> Vec<Strategy> {
    let sets = &rules.category_sets;
    let mut chain = vec![
        Strategy::Training(TrainingStrategy),
        Strategy::Equipment(EquipmentStrategy),
        Strategy::Policy(PolicyStrategy),
        Strategy::Flight(FlightStrategy::new(rules.patterns.clone())),
        Strategy::Kitesafari(KitesafariStrategy),
        Strategy::Egypt(EgyptStrategy::new(
            sets.el_gouna.clone(),
            sets.hamata.clone(),
            sets.egypt_other.clone(),
        )),
        Strategy::Greece(GreeceStrategy::new(
            sets.greece_limnos.clone(),
            sets.greece_rhodes.clone(),
            sets.greece_other.clone(),
        )),
        Strategy::Countries(CountriesStrategy::new(
            sets.turkey.clone(),
            sets.sal.clone(),
            sets.fuerteventura.clone(),
        )),
        Strategy::Exotic(ExoticStrategy::new(sets.exotic_destinations.clone())),
    ];
    chain.sort_by_key(Strategy::priority);
    chain
}
