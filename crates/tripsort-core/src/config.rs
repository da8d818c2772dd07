use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogPaths;
use crate::error::{Result, TripsortError};

const CONFIG_FILE: &str = "tripsort.toml";

pub const DEFAULT_VENUE_ALIASES: &str = "venue_aliases.json";
pub const DEFAULT_DESTINATION_ALIASES: &str = "destination_aliases.json";
pub const DEFAULT_PATTERNS: &str = "patterns.json";
pub const DEFAULT_CATEGORY_SETS: &str = "category_sets.json";

/// Default config template with comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tripsort configuration file
# Location: <config dir>/tripsort.toml

[rules]
# Rule files, relative to the config directory unless absolute.
# Missing files degrade to empty tables; malformed JSON aborts the run.
venue_aliases = "venue_aliases.json"
destination_aliases = "destination_aliases.json"
patterns = "patterns.json"
category_sets = "category_sets.json"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Locations of the rule files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default = "default_venue_aliases")]
    pub venue_aliases: PathBuf,

    #[serde(default = "default_destination_aliases")]
    pub destination_aliases: PathBuf,

    #[serde(default = "default_patterns")]
    pub patterns: PathBuf,

    #[serde(default = "default_category_sets")]
    pub category_sets: PathBuf,
}

fn default_venue_aliases() -> PathBuf {
    PathBuf::from(DEFAULT_VENUE_ALIASES)
}

fn default_destination_aliases() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION_ALIASES)
}

fn default_patterns() -> PathBuf {
    PathBuf::from(DEFAULT_PATTERNS)
}

fn default_category_sets() -> PathBuf {
    PathBuf::from(DEFAULT_CATEGORY_SETS)
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            venue_aliases: default_venue_aliases(),
            destination_aliases: default_destination_aliases(),
            patterns: default_patterns(),
            category_sets: default_category_sets(),
        }
    }
}

impl Config {
    /// Load config from the config directory. A missing file means defaults.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| TripsortError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Get config file path
    pub fn path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Write the commented default template unless a config already exists
    pub fn init(config_dir: &Path) -> Result<PathBuf> {
        let path = config_dir.join(CONFIG_FILE);
        fs::create_dir_all(config_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Resolve rule file locations against the config directory
    pub fn catalog_paths(&self, config_dir: &Path) -> CatalogPaths {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                config_dir.join(p)
            }
        };
        CatalogPaths {
            venue_aliases: resolve(&self.rules.venue_aliases),
            destination_aliases: resolve(&self.rules.destination_aliases),
            patterns: resolve(&self.rules.patterns),
            category_sets: resolve(&self.rules.category_sets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());

        let paths = config.catalog_paths(dir.path());
        assert_eq!(paths.venue_aliases, dir.path().join(DEFAULT_VENUE_ALIASES));
        assert_eq!(paths.category_sets, dir.path().join(DEFAULT_CATEGORY_SETS));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            Config::path(dir.path()),
            "[rules]\nvenue_aliases = \"custom/hotels.json\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.rules.venue_aliases, PathBuf::from("custom/hotels.json"));
        assert_eq!(config.rules.patterns, PathBuf::from(DEFAULT_PATTERNS));

        let paths = config.catalog_paths(dir.path());
        assert_eq!(paths.venue_aliases, dir.path().join("custom/hotels.json"));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("elsewhere.json");
        let mut config = Config::default();
        config.rules.patterns = absolute.clone();

        let paths = config.catalog_paths(Path::new("/unused"));
        assert_eq!(paths.patterns, absolute);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(Config::path(dir.path()), "[rules\nbroken").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(TripsortError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_init_writes_loadable_template() {
        let dir = TempDir::new().unwrap();
        let path = Config::init(dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }
}
