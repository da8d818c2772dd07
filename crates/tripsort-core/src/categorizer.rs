//! Categorization entry point.
//!
//! [`Categorizer`] owns the rule catalog and the [`Engine`] built from its
//! current rule set. Callers hand it records; it fills the normalized
//! fields that are still empty and writes the category back.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::catalog::{CatalogPaths, RuleCatalog, RuleSet};
use crate::classifier::{CategoryClassifier, Classification};
use crate::config::Config;
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::record::{Category, Record};
use crate::stats::ProcessingStats;

/// Normalizer and classifier built from one rule set.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: Arc<RuleSet>,
    normalizer: Normalizer,
    classifier: CategoryClassifier,
}

impl Engine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        let classifier = CategoryClassifier::new(&rules);
        let normalizer = Normalizer::new(Arc::clone(&rules));
        Self {
            rules,
            normalizer,
            classifier,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Normalize if needed, classify and store the category.
    pub fn classify(&self, record: &mut Record) -> Category {
        self.normalizer.normalize_record(record);
        let category = self.classifier.classify(record);
        record.category = category;
        category
    }

    pub fn explain(&self, record: &mut Record) -> Classification {
        self.normalizer.normalize_record(record);
        self.classifier.explain(record)
    }
}

/// Front end over the rule catalog and the active engine.
#[derive(Debug)]
pub struct Categorizer {
    catalog: RuleCatalog,
    engine: RwLock<Arc<Engine>>,
    /// Serializes reloads so the engine always matches the catalog.
    reload_lock: Mutex<()>,
}

impl Categorizer {
    pub fn new(catalog: RuleCatalog) -> Self {
        let engine = Engine::new(catalog.current());
        Self {
            catalog,
            engine: RwLock::new(Arc::new(engine)),
            reload_lock: Mutex::new(()),
        }
    }

    /// Load the rule files at `paths`.
    pub fn open(paths: CatalogPaths) -> Result<Self> {
        Ok(Self::new(RuleCatalog::open(paths)?))
    }

    /// Read `tripsort.toml` in `config_dir` and load the rule files it names.
    pub fn from_config_dir(config_dir: &Path) -> Result<Self> {
        let config = Config::load(config_dir)?;
        Self::open(config.catalog_paths(config_dir))
    }

    /// Categorizer over an in-memory rule set. `reload` reads the default
    /// file names from the working directory.
    pub fn from_rules(rules: RuleSet) -> Self {
        let paths = CatalogPaths::in_dir(Path::new("."));
        Self::new(RuleCatalog::with_rules(paths, rules))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Engine in use right now. Hold on to it for a consistent batch.
    pub fn engine(&self) -> Arc<Engine> {
        Arc::clone(&*self.engine.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn classify(&self, record: &mut Record) -> Category {
        self.engine().classify(record)
    }

    /// Classify a bare venue/destination pair.
    pub fn categorize_simple(&self, venue: &str, destination: &str) -> Category {
        let mut record = Record::new(venue, destination);
        self.classify(&mut record)
    }

    /// Classify a batch against a single engine snapshot.
    pub fn categorize_all(&self, records: &mut [Record]) -> ProcessingStats {
        let engine = self.engine();
        engine.normalizer().normalize_all(records);

        let mut stats = ProcessingStats::default();
        for record in records.iter_mut() {
            engine.classify(record);
            stats.add(record);
        }

        tracing::info!(
            total = stats.total,
            assigned = stats.assigned,
            unassigned = stats.unassigned,
            accuracy = format!("{:.1}%", stats.accuracy_percentage()),
            "categorization finished"
        );
        stats
    }

    pub fn explain(&self, record: &mut Record) -> Classification {
        self.engine().explain(record)
    }

    /// Reload the rule files and publish a new engine.
    ///
    /// On failure the current engine stays in place and the error is returned.
    pub fn reload(&self) -> Result<()> {
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let rules = self.catalog.reload()?;
        let engine = Arc::new(Engine::new(rules));
        *self.engine.write().unwrap_or_else(PoisonError::into_inner) = engine;
        Ok(())
    }
}
