//! Pattern sets
//!
//! Fuzzy detection lists loaded from `patterns.json`. Flight and
//! kitesafari lists are regular expressions, compiled once per load;
//! transfer patterns are plain substrings.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, TripsortError};

#[derive(Debug, Default, Deserialize)]
struct PatternFile {
    #[serde(default)]
    flight_patterns: Vec<String>,
    #[serde(default)]
    kitesafari_patterns: Vec<String>,
    #[serde(default)]
    transfer_patterns: Vec<String>,
}

/// Compiled pattern lists.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    flight: Vec<Regex>,
    kitesafari: Vec<Regex>,
    transfer: Vec<String>,
}

impl PatternSet {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let file: PatternFile =
            serde_json::from_str(content).map_err(|e| TripsortError::ConfigMalformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            flight: compile(path, "flight_patterns", &file.flight_patterns)?,
            kitesafari: compile(path, "kitesafari_patterns", &file.kitesafari_patterns)?,
            transfer: file
                .transfer_patterns
                .into_iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        })
    }

    /// Build from in-memory lists, e.g. for tests.
    pub fn from_lists(flight: &[&str], kitesafari: &[&str], transfer: &[&str]) -> Result<Self> {
        let path = Path::new("<inline>");
        Ok(Self {
            flight: compile(path, "flight_patterns", flight)?,
            kitesafari: compile(path, "kitesafari_patterns", kitesafari)?,
            transfer: transfer.iter().map(|p| p.to_lowercase()).collect(),
        })
    }

    /// True when any flight or kitesafari expression matches.
    pub fn matches_flight(&self, text_lower: &str) -> bool {
        self.flight
            .iter()
            .chain(self.kitesafari.iter())
            .any(|re| re.is_match(text_lower))
    }

    pub fn matches_transfer(&self, text_lower: &str) -> bool {
        self.transfer.iter().any(|p| text_lower.contains(p.as_str()))
    }

    /// (flight, kitesafari, transfer) list sizes.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.flight.len(), self.kitesafari.len(), self.transfer.len())
    }
}

fn compile<S: AsRef<str>>(path: &Path, list: &str, patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p.as_ref()).map_err(|e| TripsortError::InvalidPattern {
                path: path.to_path_buf(),
                list: list.to_string(),
                pattern: p.as_ref().to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compiles_lists() {
        let set = PatternSet::parse(
            r#"{
                "flight_patterns": ["waw\\s*-\\s*hrg", "^lot "],
                "kitesafari_patterns": ["hrg.*kite\\s*safari"],
                "transfer_patterns": ["Transfer", "shuttle"],
                "unrelated": ["ignored"]
            }"#,
            Path::new("patterns.json"),
        )
        .unwrap();
        assert_eq!(set.counts(), (2, 1, 2));
        assert!(set.matches_flight("bilet waw - hrg"));
        assert!(set.matches_flight("lot hrg na kite safari"));
        assert!(!set.matches_flight("kite safari"));
        assert!(!set.matches_flight("hotel ocean"));
        assert!(set.matches_transfer("airport transfer"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let set = PatternSet::parse("{}", Path::new("patterns.json")).unwrap();
        assert_eq!(set.counts(), (0, 0, 0));
        assert!(!set.matches_flight("waw-hrg"));
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let err = PatternSet::parse(
            r#"{"flight_patterns": ["(unclosed"]}"#,
            Path::new("patterns.json"),
        )
        .unwrap_err();
        match err {
            TripsortError::InvalidPattern { list, pattern, .. } => {
                assert_eq!(list, "flight_patterns");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = PatternSet::parse(r#"{"flight_patterns": "waw"}"#, Path::new("p.json"));
        assert!(matches!(err, Err(TripsortError::ConfigMalformed { .. })));
    }
}
