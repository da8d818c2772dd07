//! Text normalization.
//!
//! [`normalize_text`] is the base transform every field falls back to.
//! [`normalize_with_rules`] puts an alias table in front of it.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{AliasTable, RuleSet};
use crate::record::Record;

/// Accented letters folded to ASCII.
const FOLD_TABLE: &[(char, char)] = &[
    ('ł', 'l'),
    ('ą', 'a'),
    ('ć', 'c'),
    ('ę', 'e'),
    ('ń', 'n'),
    ('ó', 'o'),
    ('ś', 's'),
    ('ź', 'z'),
    ('ż', 'z'),
];

/// Star glyphs, brackets, commas, dots and decimal digits (any script).
static DECORATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*★☆(),.\d]").expect("decoration pattern"));

fn fold(c: char) -> char {
    FOLD_TABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Base transform: strip decoration, lowercase, fold accents, turn
/// hyphens/underscores into spaces and collapse whitespace.
///
/// Idempotent: `normalize_text(&normalize_text(x)) == normalize_text(x)`.
pub fn normalize_text(text: &str) -> String {
    let cleaned: String = DECORATION
        .replace_all(text, "")
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold)
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Exact alias, then first declared substring alias, then the base transform.
pub fn normalize_with_rules(text: &str, table: &AliasTable) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lower = text.to_lowercase();
    let lower = lower.trim();
    match table.lookup(lower) {
        Some(canonical) => canonical.to_string(),
        None => normalize_text(text),
    }
}

/// Normalizer bound to one rule set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Arc<RuleSet>,
}

impl Normalizer {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn normalize_venue(&self, venue: &str) -> String {
        normalize_with_rules(venue, &self.rules.venue_aliases)
    }

    pub fn normalize_destination(&self, destination: &str) -> String {
        normalize_with_rules(destination, &self.rules.destination_aliases)
    }

    /// Flight or kitesafari route patterns anywhere in the text.
    pub fn detect_flight_patterns(&self, text: &str) -> bool {
        self.rules.patterns.matches_flight(&text.to_lowercase())
    }

    pub fn has_transfer_patterns(&self, text: &str) -> bool {
        self.rules.patterns.matches_transfer(&text.to_lowercase())
    }

    /// Fill whichever normalized field is still empty.
    pub fn normalize_record(&self, record: &mut Record) {
        if record.venue_normalized.is_empty() {
            record.venue_normalized = self.normalize_venue(&record.venue);
        }
        if record.destination_normalized.is_empty() {
            record.destination_normalized = self.normalize_destination(&record.destination);
        }
    }

    pub fn normalize_all(&self, records: &mut [Record]) {
        tracing::debug!(records = records.len(), "normalizing venues and destinations");
        for record in records.iter_mut() {
            self.normalize_record(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternSet;

    #[test]
    fn test_strips_decoration_and_digits() {
        assert_eq!(normalize_text("Hotel Ocean ★★★★ (4*)"), "hotel ocean");
        assert_eq!(normalize_text("Sentido, Palm. Royal 2024"), "sentido palm royal");
    }

    #[test]
    fn test_only_decimal_digits_are_stripped() {
        assert_eq!(normalize_text("Pokój ٣ 12"), "pokoj");
        assert_eq!(normalize_text("Suite ½ Ⅻ"), "suite ½ ⅻ");
    }

    #[test]
    fn test_folds_polish_letters() {
        assert_eq!(normalize_text("Wypożyczenie Sprzętu"), "wypozyczenie sprzetu");
        assert_eq!(normalize_text("ŁÓDŹ"), "lodz");
        assert_eq!(normalize_text("Skrócenie"), "skrocenie");
    }

    #[test]
    fn test_hyphens_and_whitespace() {
        assert_eq!(normalize_text("  WAW-HRG_bilet  "), "waw hrg bilet");
        assert_eq!(normalize_text("a - b"), "a b");
        assert_eq!(normalize_text("a\t\n  b"), "a b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("***"), "");
        assert_eq!(normalize_with_rules("", &AliasTable::new()), "");
    }

    #[test]
    fn test_base_transform_is_idempotent() {
        let samples = [
            "Hotel Ocean ★★★★",
            "a - b",
            "  Kite-Safari  M/Y Valerie (7 dni) ",
            "Grecja, Limnos",
            "WAW-HRG-WAW 12.05",
            "Ünïcödé_ŻÓŁW",
            "",
            "---",
            "Ⅻ roman ½ half",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_rules_exact_then_substring_then_base() {
        let table = AliasTable::from_pairs([
            ("palm royal", "sentido palm royal soma bay"),
            ("yalla", "yalla kite"),
            ("three corners", "three corners ocean view"),
        ]);
        assert_eq!(
            normalize_with_rules("  PALM ROYAL ", &table),
            "sentido palm royal soma bay"
        );
        assert_eq!(normalize_with_rules("Yalla School 10h", &table), "yalla kite");
        assert_eq!(normalize_with_rules("Hotel Ocean-View", &table), "hotel ocean view");
    }

    #[test]
    fn test_normalize_record_keeps_existing_fields() {
        let rules = RuleSet {
            destination_aliases: AliasTable::from_pairs([("lemnos", "limnos")]),
            ..RuleSet::default()
        };
        let normalizer = Normalizer::new(Arc::new(rules));

        let mut record = Record::new("Hotel Ocean", "Lemnos");
        record.venue_normalized = "preset".to_string();
        normalizer.normalize_record(&mut record);

        assert_eq!(record.venue_normalized, "preset");
        assert_eq!(record.destination_normalized, "limnos");
        assert_eq!(record.venue, "Hotel Ocean");
    }

    #[test]
    fn test_pattern_helpers_lowercase_input() {
        let rules = RuleSet {
            patterns: PatternSet::from_lists(&["waw.hrg"], &["hrg.*safari"], &["transfer"])
                .unwrap(),
            ..RuleSet::default()
        };
        let normalizer = Normalizer::new(Arc::new(rules));
        assert!(normalizer.detect_flight_patterns("WAW-HRG"));
        assert!(normalizer.detect_flight_patterns("Lot HRG Kitesafari"));
        assert!(normalizer.has_transfer_patterns("Airport TRANSFER"));
        assert!(!normalizer.has_transfer_patterns("Hotel"));
    }
}
