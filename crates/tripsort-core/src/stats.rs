//! Per-batch processing statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::record::{Category, Record};

/// Counts for one year of bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    pub main: usize,
    pub training: usize,
    pub unassigned: usize,
}

impl YearSummary {
    pub fn total(&self) -> usize {
        self.main + self.training + self.unassigned
    }
}

/// Result summary of one categorization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingStats {
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub by_category: BTreeMap<Category, usize>,
    /// Keyed by booking year; records without a year are left out
    pub by_year: BTreeMap<i32, YearSummary>,
}

impl ProcessingStats {
    /// Tally already categorized records.
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add(record);
        }
        stats
    }

    pub fn add(&mut self, record: &Record) {
        let category = record.category;
        self.total += 1;
        if category.is_assigned() {
            self.assigned += 1;
        } else {
            self.unassigned += 1;
        }
        *self.by_category.entry(category).or_default() += 1;

        if let Some(year) = record.year {
            let summary = self.by_year.entry(year).or_default();
            if category.is_training_group() {
                summary.training += 1;
            } else if category.is_assigned() {
                summary.main += 1;
            } else {
                summary.unassigned += 1;
            }
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// Share of records that got a real category, in percent.
    pub fn accuracy_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.assigned as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records:    {}", self.total)?;
        writeln!(f, "Assigned:   {}", self.assigned)?;
        writeln!(f, "Unassigned: {}", self.unassigned)?;
        write!(f, "Accuracy:   {:.1}%", self.accuracy_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorized(category: Category, year: Option<i32>) -> Record {
        let mut record = Record::new("v", "d");
        record.category = category;
        record.year = year;
        record
    }

    #[test]
    fn test_counts_and_accuracy() {
        let records = vec![
            categorized(Category::Training, Some(2023)),
            categorized(Category::GreeceLimnos, Some(2023)),
            categorized(Category::GreeceLimnos, Some(2024)),
            categorized(Category::Unassigned, None),
        ];
        let stats = ProcessingStats::from_records(&records);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.assigned, 3);
        assert_eq!(stats.unassigned, 1);
        assert_eq!(stats.count(Category::GreeceLimnos), 2);
        assert_eq!(stats.count(Category::Ski), 0);
        assert!((stats.accuracy_percentage() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_year_summary_splits_training_group() {
        let records = vec![
            categorized(Category::Training, Some(2023)),
            categorized(Category::Equipment, Some(2023)),
            categorized(Category::Sal, Some(2023)),
            categorized(Category::Unassigned, Some(2023)),
        ];
        let stats = ProcessingStats::from_records(&records);
        let y2023 = stats.by_year[&2023];
        assert_eq!(
            y2023,
            YearSummary {
                main: 1,
                training: 2,
                unassigned: 1
            }
        );
        assert_eq!(y2023.total(), 4);
    }

    #[test]
    fn test_empty_batch() {
        let stats = ProcessingStats::from_records(&[]);
        assert_eq!(stats.accuracy_percentage(), 0.0);
        assert!(stats.to_string().contains("Accuracy:   0.0%"));
    }
}
