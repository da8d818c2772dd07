//! Single-country destinations, checked in a fixed order.

use super::{contains_any, is_one_of, RecordView};
use crate::catalog::VenueSet;
use crate::record::Category;

#[derive(Debug, Clone, Default)]
pub struct CountriesStrategy {
    turkey: VenueSet,
    sal: VenueSet,
    fuerteventura: VenueSet,
}

impl CountriesStrategy {
    pub const PRIORITY: u32 = 12;

    pub fn new(turkey: VenueSet, sal: VenueSet, fuerteventura: VenueSet) -> Self {
        Self {
            turkey,
            sal,
            fuerteventura,
        }
    }

    fn resolve(&self, view: &RecordView<'_>) -> Option<Category> {
        let (venue, destination) = (view.venue, view.destination);

        if contains_any(destination, &["maroko", "morocco"]) || destination == "aga" {
            return Some(Category::Morocco);
        }
        // Tunisia is sold but has no reporting category
        if contains_any(destination, &["tunezja", "tunisia"])
            || is_one_of(destination, &["tun", "dba"])
        {
            return Some(Category::Unassigned);
        }
        if is_one_of(destination, &["chorwacja", "croatia"]) {
            return Some(Category::Croatia);
        }
        if is_one_of(destination, &["turcja", "turkey"]) || self.turkey.matches(venue) {
            return Some(Category::Turkey);
        }
        if is_one_of(destination, &["mauritius", "mru"])
            || destination.contains("mauritius")
            || venue.contains("riu creole")
        {
            return Some(Category::Mauritius);
        }
        if destination == "sal" || self.sal.matches(venue) {
            return Some(Category::Sal);
        }
        if destination == "fuerteventura" || self.fuerteventura.matches(venue) {
            return Some(Category::Fuerteventura);
        }
        if is_one_of(destination, &["for", "ssa"])
            || contains_any(destination, &["brazylia", "brazil", "fortaleza"])
            || contains_any(venue, &["barra grande", "jericoacoara", "brazil kite safari"])
        {
            return Some(Category::Brazil);
        }
        None
    }

    pub fn can_handle(&self, view: &RecordView<'_>) -> bool {
        self.resolve(view).is_some()
    }

    pub fn classify(&self, view: &RecordView<'_>) -> Category {
        self.resolve(view).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> CountriesStrategy {
        CountriesStrategy::new(
            VenueSet::new(&["akyaka kite"]),
            VenueSet::new(&["morabeza", "odjo d'agua"]),
            VenueSet::new(&["bahia calma"]),
        )
    }

    fn classify(venue: &str, destination: &str) -> Option<Category> {
        let s = strategy();
        let view = RecordView::from_normalized(venue, destination);
        s.can_handle(&view).then(|| s.classify(&view))
    }

    #[test]
    fn test_destination_rules() {
        assert_eq!(classify("riad", "maroko dakhla"), Some(Category::Morocco));
        assert_eq!(classify("riad", "aga"), Some(Category::Morocco));
        assert_eq!(classify("hotel", "chorwacja"), Some(Category::Croatia));
        assert_eq!(classify("hotel", "turcja"), Some(Category::Turkey));
        assert_eq!(classify("hotel", "mru"), Some(Category::Mauritius));
        assert_eq!(classify("hotel", "sal"), Some(Category::Sal));
        assert_eq!(classify("hotel", "fuerteventura"), Some(Category::Fuerteventura));
        assert_eq!(classify("pousada", "fortaleza"), Some(Category::Brazil));
    }

    #[test]
    fn test_tunisia_is_claimed_but_unassigned() {
        assert_eq!(classify("hotel", "tunezja djerba"), Some(Category::Unassigned));
        assert_eq!(classify("hotel", "dba"), Some(Category::Unassigned));
    }

    #[test]
    fn test_venue_rules() {
        assert_eq!(classify("akyaka kite hotel", ""), Some(Category::Turkey));
        assert_eq!(classify("hotel riu creole", ""), Some(Category::Mauritius));
        assert_eq!(classify("morabeza", "cabo verde"), Some(Category::Sal));
        assert_eq!(classify("bahia calma", ""), Some(Category::Fuerteventura));
        assert_eq!(classify("brazil kite safari", ""), Some(Category::Brazil));
        assert_eq!(classify("pousada jericoacoara", ""), Some(Category::Brazil));
    }

    #[test]
    fn test_unknown_country() {
        assert_eq!(classify("hotel", "islandia"), None);
    }
}
