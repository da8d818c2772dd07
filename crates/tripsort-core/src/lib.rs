pub mod catalog;
pub mod categorizer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod normalize;
pub mod record;
pub mod stats;
pub mod strategy;

pub use catalog::{
    AliasDocument, AliasTable, CatalogPaths, CategorySets, PatternSet, RuleCatalog, RuleSet,
    VenueSet,
};
pub use categorizer::{Categorizer, Engine};
pub use classifier::{CategoryClassifier, Classification, FallbackStep, Stage};
pub use config::Config;
pub use error::{Result, TripsortError};
pub use normalize::{normalize_text, normalize_with_rules, Normalizer};
pub use record::{Category, Record};
pub use stats::{ProcessingStats, YearSummary};
pub use strategy::{build_chain, RecordView, Strategy, StrategyKind};
