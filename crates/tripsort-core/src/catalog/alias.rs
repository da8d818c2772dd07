//! Alias tables
//!
//! Ordered `key -> canonical` rules used by the normalizer. Two JSON shapes
//! are accepted and flattened right after parsing:
//!
//! ```json
//! { "sentido palm royal": "sentido palm royal soma bay" }
//! ```
//!
//! ```json
//! { "egypt": { "sentido palm royal": "sentido palm royal soma bay" } }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, TripsortError};

/// A single alias rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    pub key: String,
    pub canonical: String,
}

/// Ordered alias table with an exact-key index.
///
/// Rule order is the declaration order of the source file. Substring
/// lookups return the first declared match, not the longest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
    exact: HashMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs in order. Later duplicates overwrite earlier values.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::new();
        for (key, canonical) in pairs {
            table.insert(key.as_ref(), canonical);
        }
        table
    }

    /// Insert a rule. The key is trimmed and lowercased; an existing key
    /// keeps its position and takes the new canonical value.
    ///
    /// Returns `false` when the key is empty and the rule was dropped.
    pub fn insert(&mut self, key: &str, canonical: impl Into<String>) -> bool {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return false;
        }
        let canonical = canonical.into();
        match self.exact.get(&key) {
            Some(&idx) => self.rules[idx].canonical = canonical,
            None => {
                self.exact.insert(key.clone(), self.rules.len());
                self.rules.push(AliasRule { key, canonical });
            }
        }
        true
    }

    /// Exact match on the whole (already lowercased, trimmed) text.
    pub fn exact(&self, text_lower: &str) -> Option<&str> {
        self.exact
            .get(text_lower)
            .map(|&idx| self.rules[idx].canonical.as_str())
    }

    /// First declared rule whose key occurs inside the text.
    pub fn first_substring(&self, text_lower: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| text_lower.contains(rule.key.as_str()))
            .map(|rule| rule.canonical.as_str())
    }

    /// Exact match, then first substring match.
    pub fn lookup(&self, text_lower: &str) -> Option<&str> {
        self.exact(text_lower)
            .or_else(|| self.first_substring(text_lower))
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct canonical values.
    pub fn canonical_values(&self) -> BTreeSet<&str> {
        self.rules.iter().map(|r| r.canonical.as_str()).collect()
    }
}

/// Parsed alias file before flattening.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasDocument {
    /// `{"phrase": "canonical"}`
    Flat(Vec<(String, String)>),
    /// `{"group": {"phrase": "canonical"}}`, possibly mixed with top-level rules
    Grouped(Vec<(String, AliasGroup)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AliasGroup {
    Rules(Vec<(String, String)>),
    /// A bare `"phrase": "canonical"` entry inside a grouped document
    Single(String),
}

impl AliasDocument {
    /// Parse JSON text. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| TripsortError::ConfigMalformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let Value::Object(map) = value else {
            return Err(malformed(path, "top-level value must be an object"));
        };
        Self::from_map(map, path)
    }

    fn from_map(map: Map<String, Value>, path: &Path) -> Result<Self> {
        if map.values().all(Value::is_string) {
            let pairs = map
                .into_iter()
                .filter_map(|(k, v)| match v {
                    Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect();
            return Ok(Self::Flat(pairs));
        }

        let mut groups = Vec::with_capacity(map.len());
        for (name, value) in map {
            let group = match value {
                Value::String(canonical) => AliasGroup::Single(canonical),
                Value::Object(rules) => {
                    let mut pairs = Vec::with_capacity(rules.len());
                    for (key, canonical) in rules {
                        match canonical {
                            Value::String(s) => pairs.push((key, s)),
                            other => {
                                return Err(malformed(
                                    path,
                                    &format!(
                                        "group '{}' key '{}' maps to {} instead of a string",
                                        name,
                                        key,
                                        json_kind(&other)
                                    ),
                                ))
                            }
                        }
                    }
                    AliasGroup::Rules(pairs)
                }
                other => {
                    return Err(malformed(
                        path,
                        &format!(
                            "entry '{}' is {}, expected a string or an object",
                            name,
                            json_kind(&other)
                        ),
                    ))
                }
            };
            groups.push((name, group));
        }
        Ok(Self::Grouped(groups))
    }

    /// Flatten into a single table in declaration order.
    pub fn into_table(self) -> AliasTable {
        let mut table = AliasTable::new();
        let mut dropped = 0usize;
        match self {
            Self::Flat(pairs) => {
                for (key, canonical) in pairs {
                    if !table.insert(&key, canonical) {
                        dropped += 1;
                    }
                }
            }
            Self::Grouped(groups) => {
                for (name, group) in groups {
                    match group {
                        AliasGroup::Rules(pairs) => {
                            for (key, canonical) in pairs {
                                if !table.insert(&key, canonical) {
                                    dropped += 1;
                                }
                            }
                        }
                        AliasGroup::Single(canonical) => {
                            if !table.insert(&name, canonical) {
                                dropped += 1;
                            }
                        }
                    }
                }
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "dropped alias rules with empty keys");
        }
        table
    }
}

fn malformed(path: &Path, message: &str) -> TripsortError {
    TripsortError::ConfigMalformed {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
