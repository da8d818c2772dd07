//! # Rule Catalog
//!
//! Loads the rule files the engine runs on and publishes them as one
//! immutable [`RuleSet`].
//!
//! - `alias`: venue/destination alias tables (flat or legacy grouped JSON)
//! - `patterns`: flight, kitesafari and transfer pattern lists
//! - `sets`: curated venue sets per region
//!
//! A missing file degrades to an empty table with a warning. A malformed
//! file fails the whole load; on [`RuleCatalog::reload`] the previously
//! published rule set stays active.
//!
//! ```rust
//! use tripsort_core::catalog::{RuleSet, AliasTable};
//!
//! let rules = RuleSet {
//!     venue_aliases: AliasTable::from_pairs([("yalla", "yalla kite")]),
//!     ..RuleSet::default()
//! };
//! assert_eq!(rules.venue_aliases.lookup("yalla school"), Some("yalla kite"));
//! ```

mod alias;
mod patterns;
mod sets;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;

pub use alias::{AliasDocument, AliasGroup, AliasRule, AliasTable};
pub use patterns::PatternSet;
pub use sets::{CategorySets, VenueSet};

/// Locations of the four rule files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub venue_aliases: PathBuf,
    pub destination_aliases: PathBuf,
    pub patterns: PathBuf,
    pub category_sets: PathBuf,
}

impl CatalogPaths {
    /// Default file names inside one directory.
    pub fn in_dir(dir: &Path) -> Self {
        crate::config::Config::default().catalog_paths(dir)
    }
}

/// Immutable set of loaded rule tables.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub venue_aliases: AliasTable,
    pub destination_aliases: AliasTable,
    pub patterns: PatternSet,
    pub category_sets: CategorySets,
}

impl RuleSet {
    /// Load every rule file. Fails on the first malformed file.
    pub fn load(paths: &CatalogPaths) -> Result<Self> {
        let venue_aliases = load_aliases(&paths.venue_aliases)?;
        let destination_aliases = load_aliases(&paths.destination_aliases)?;

        let patterns = match read_optional(&paths.patterns)? {
            Some(content) => PatternSet::parse(&content, &paths.patterns)?,
            None => PatternSet::default(),
        };
        let (flight, kitesafari, transfer) = patterns.counts();
        tracing::debug!(
            path = %paths.patterns.display(),
            flight,
            kitesafari,
            transfer,
            "loaded pattern set"
        );

        let category_sets = match read_optional(&paths.category_sets)? {
            Some(content) => CategorySets::parse(&content, &paths.category_sets)?,
            None => CategorySets::default(),
        };

        tracing::info!(
            venue_aliases = venue_aliases.len(),
            destination_aliases = destination_aliases.len(),
            curated_entries = category_sets.total(),
            "rule set loaded"
        );

        Ok(Self {
            venue_aliases,
            destination_aliases,
            patterns,
            category_sets,
        })
    }
}

fn load_aliases(path: &Path) -> Result<AliasTable> {
    let Some(content) = read_optional(path)? else {
        return Ok(AliasTable::new());
    };
    let document = AliasDocument::parse(&content, path)?;
    if matches!(document, AliasDocument::Grouped(_)) {
        tracing::debug!(path = %path.display(), "flattening grouped alias file");
    }
    let table = document.into_table();
    tracing::debug!(path = %path.display(), entries = table.len(), "loaded alias table");
    Ok(table)
}

/// Read a rule file, treating "not found" as an empty table.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "rule file not found, using an empty table");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Owner of the active rule set.
///
/// Readers clone the inner `Arc` under a short read lock; `reload` parses
/// everything before taking the write lock, so a reader never observes a
/// partially loaded set.
#[derive(Debug)]
pub struct RuleCatalog {
    paths: CatalogPaths,
    active: RwLock<Arc<RuleSet>>,
}

impl RuleCatalog {
    /// Load the rule files and publish them.
    pub fn open(paths: CatalogPaths) -> Result<Self> {
        let rules = RuleSet::load(&paths)?;
        Ok(Self {
            paths,
            active: RwLock::new(Arc::new(rules)),
        })
    }

    /// Wrap an already built rule set. `reload` will read from `paths`.
    pub fn with_rules(paths: CatalogPaths, rules: RuleSet) -> Self {
        Self {
            paths,
            active: RwLock::new(Arc::new(rules)),
        }
    }

    pub fn paths(&self) -> &CatalogPaths {
        &self.paths
    }

    /// Currently published rule set.
    pub fn current(&self) -> Arc<RuleSet> {
        Arc::clone(&*self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Re-read every file and swap the published set.
    pub fn reload(&self) -> Result<Arc<RuleSet>> {
        let rules = match RuleSet::load(&self.paths) {
            Ok(rules) => Arc::new(rules),
            Err(e) => {
                tracing::warn!(error = %e, "rule reload failed, keeping previous rule set");
                return Err(e);
            }
        };
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&rules);
        tracing::info!("rule set reloaded");
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripsortError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_missing_files_give_empty_rule_set() {
        let dir = TempDir::new().unwrap();
        let rules = RuleSet::load(&CatalogPaths::in_dir(dir.path())).unwrap();
        assert!(rules.venue_aliases.is_empty());
        assert!(rules.destination_aliases.is_empty());
        assert_eq!(rules.patterns.counts(), (0, 0, 0));
        assert_eq!(rules.category_sets.total(), 0);
    }

    #[test]
    fn test_load_all_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "venue_aliases.json", r#"{"yalla": "yalla kite"}"#);
        write(
            &dir,
            "destination_aliases.json",
            r#"{"greece": {"lemnos": "limnos"}, "egypt": {"hurgada": "hurghada"}}"#,
        );
        write(&dir, "patterns.json", r#"{"flight_patterns": ["waw.hrg"]}"#);
        write(&dir, "category_sets.json", r#"{"sal_hotels": ["morabeza"]}"#);

        let rules = RuleSet::load(&CatalogPaths::in_dir(dir.path())).unwrap();
        assert_eq!(rules.venue_aliases.len(), 1);
        assert_eq!(rules.destination_aliases.exact("lemnos"), Some("limnos"));
        assert!(rules.patterns.matches_flight("waw-hrg"));
        assert!(rules.category_sets.sal.matches("hotel morabeza"));
    }

    #[test]
    fn test_malformed_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        write(&dir, "venue_aliases.json", r#"{"ok": "fine"}"#);
        write(&dir, "destination_aliases.json", "{ broken");

        let err = RuleSet::load(&CatalogPaths::in_dir(dir.path())).unwrap_err();
        match err {
            TripsortError::ConfigMalformed { path, .. } => {
                assert!(path.ends_with("destination_aliases.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reload_swaps_and_keeps_old_on_failure() {
        let dir = TempDir::new().unwrap();
        write(&dir, "venue_aliases.json", r#"{"a": "first"}"#);
        let catalog = RuleCatalog::open(CatalogPaths::in_dir(dir.path())).unwrap();
        let before = catalog.current();
        assert_eq!(before.venue_aliases.exact("a"), Some("first"));

        write(&dir, "venue_aliases.json", r#"{"a": "second"}"#);
        catalog.reload().unwrap();
        assert_eq!(catalog.current().venue_aliases.exact("a"), Some("second"));
        // snapshot taken earlier is untouched
        assert_eq!(before.venue_aliases.exact("a"), Some("first"));

        write(&dir, "venue_aliases.json", "not json");
        assert!(catalog.reload().is_err());
        assert_eq!(catalog.current().venue_aliases.exact("a"), Some("second"));
    }
}
