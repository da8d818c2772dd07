//! Booking record and category taxonomy.
//!
//! A [`Record`] is created per input row, normalized once and classified
//! once. Raw fields are never rewritten by the engine.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed category taxonomy.
///
/// Serialized as the human-readable label so exported records carry the
/// same strings reports are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Training")]
    Training,
    #[serde(rename = "Equipment")]
    Equipment,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Flight only")]
    FlightOnly,
    #[serde(rename = "Kitesafari")]
    Kitesafari,
    #[serde(rename = "Egypt – El Gouna")]
    EgyptElGouna,
    #[serde(rename = "Egypt – Hamata")]
    EgyptHamata,
    #[serde(rename = "Egypt – other region")]
    EgyptOther,
    #[serde(rename = "Greece – Limnos")]
    GreeceLimnos,
    #[serde(rename = "Greece – Rhodes")]
    GreeceRhodes,
    #[serde(rename = "Greece – other")]
    GreeceOther,
    #[serde(rename = "Morocco")]
    Morocco,
    #[serde(rename = "Croatia")]
    Croatia,
    #[serde(rename = "Turkey")]
    Turkey,
    #[serde(rename = "Mauritius")]
    Mauritius,
    #[serde(rename = "Sal")]
    Sal,
    #[serde(rename = "Fuerteventura")]
    Fuerteventura,
    #[serde(rename = "Brazil")]
    Brazil,
    #[serde(rename = "Exotic – other")]
    ExoticOther,
    #[serde(rename = "Ski")]
    Ski,
    #[serde(rename = "Voucher")]
    Voucher,
    #[default]
    #[serde(rename = "Unassigned")]
    Unassigned,
}

impl Category {
    /// Every label the engine can emit, `Unassigned` last.
    pub const ALL: [Category; 22] = [
        Category::Training,
        Category::Equipment,
        Category::Insurance,
        Category::FlightOnly,
        Category::Kitesafari,
        Category::EgyptElGouna,
        Category::EgyptHamata,
        Category::EgyptOther,
        Category::GreeceLimnos,
        Category::GreeceRhodes,
        Category::GreeceOther,
        Category::Morocco,
        Category::Croatia,
        Category::Turkey,
        Category::Mauritius,
        Category::Sal,
        Category::Fuerteventura,
        Category::Brazil,
        Category::ExoticOther,
        Category::Ski,
        Category::Voucher,
        Category::Unassigned,
    ];

    /// Destination and product categories in report order.
    pub const MAIN: [Category; 19] = [
        Category::Brazil,
        Category::Croatia,
        Category::EgyptElGouna,
        Category::EgyptHamata,
        Category::EgyptOther,
        Category::ExoticOther,
        Category::Fuerteventura,
        Category::GreeceOther,
        Category::GreeceLimnos,
        Category::GreeceRhodes,
        Category::Kitesafari,
        Category::Morocco,
        Category::Mauritius,
        Category::Ski,
        Category::Sal,
        Category::FlightOnly,
        Category::Turkey,
        Category::Insurance,
        Category::Voucher,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Training => "Training",
            Self::Equipment => "Equipment",
            Self::Insurance => "Insurance",
            Self::FlightOnly => "Flight only",
            Self::Kitesafari => "Kitesafari",
            Self::EgyptElGouna => "Egypt – El Gouna",
            Self::EgyptHamata => "Egypt – Hamata",
            Self::EgyptOther => "Egypt – other region",
            Self::GreeceLimnos => "Greece – Limnos",
            Self::GreeceRhodes => "Greece – Rhodes",
            Self::GreeceOther => "Greece – other",
            Self::Morocco => "Morocco",
            Self::Croatia => "Croatia",
            Self::Turkey => "Turkey",
            Self::Mauritius => "Mauritius",
            Self::Sal => "Sal",
            Self::Fuerteventura => "Fuerteventura",
            Self::Brazil => "Brazil",
            Self::ExoticOther => "Exotic – other",
            Self::Ski => "Ski",
            Self::Voucher => "Voucher",
            Self::Unassigned => "Unassigned",
        }
    }

    /// Look up a category by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Training and equipment bookings are reported apart from destinations.
    pub fn is_training_group(&self) -> bool {
        matches!(self, Self::Training | Self::Equipment)
    }

    pub fn is_assigned(&self) -> bool {
        *self != Self::Unassigned
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single booking row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Raw venue (hotel, school, product) name as exported by the booking system
    pub venue: String,
    /// Raw destination name
    pub destination: String,
    /// Empty until normalized
    #[serde(default)]
    pub venue_normalized: String,
    /// Empty until normalized
    #[serde(default)]
    pub destination_normalized: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Month number, 1-12
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDate>,
}

impl Record {
    pub fn new(venue: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Attach the booking creation date, deriving year and month when unset.
    pub fn with_created(mut self, created: NaiveDate) -> Self {
        self.created = Some(created);
        self.fill_period();
        self
    }

    /// Derive missing year/month from `created`.
    pub fn fill_period(&mut self) {
        if let Some(created) = self.created {
            if self.year.is_none() {
                self.year = Some(created.year());
            }
            if self.month.is_none() {
                self.month = Some(created.month());
            }
        }
    }
}
