//! Equipment rental and sales.

use super::{contains_any, RecordView};
use crate::record::Category;

/// Rentals that are sold as training packages.
const TRAINING_CARVE_OUTS: &[&str] = &[
    "wypozyczenie sprzetu premium",
    "wypoz sprzetu standard",
    "wypozyczenie sprzetu standard",
    "premium equipment rental",
    "standard equipment rental",
];

const KEYWORDS: &[&str] = &[
    "sprzęt",
    "sprzet",
    "wynajem",
    "latawce",
    "equipment",
    "zestaw kite",
    "deska",
    "trapez",
    "wypoz latawca",
    "wypozczenie latawca",
    "gear",
    "harness",
    "kite set",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentStrategy;

impl EquipmentStrategy {
    pub const PRIORITY: u32 = 2;

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        if contains_any(view.venue, TRAINING_CARVE_OUTS) {
            return false;
        }
        contains_any(view.venue, KEYWORDS)
    }

    pub fn classify(&self, _view: &RecordView<'_>) -> Category {
        Category::Equipment
    }
}
