//! Ordering of filtered offers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::Offer;

/// Error returned for a sort key name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0:?}")]
pub struct InvalidSortKey(pub String);

/// Field by which results are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Cheapest first.
    #[default]
    Price,
    /// Shortest first.
    Duration,
    /// Earliest "HH:MM" first.
    Departure,
    /// Best rated first.
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Price,
        SortKey::Duration,
        SortKey::Departure,
        SortKey::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Duration => "duration",
            SortKey::Departure => "departure",
            SortKey::Rating => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "duration" => Ok(SortKey::Duration),
            "departure" => Ok(SortKey::Departure),
            "rating" => Ok(SortKey::Rating),
            _ => Err(InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two offers under a sort key.
///
/// Numeric fields use `total_cmp`, so the order is total even for values
/// the conversion layer would never produce. Departure compares the
/// "HH:MM" label lexically; a malformed timestamp compares by its raw text.
pub fn compare(a: &Offer, b: &Offer, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Duration => a
            .effective_duration_minutes()
            .cmp(&b.effective_duration_minutes()),
        SortKey::Departure => a.departure.label().cmp(b.departure.label()),
        SortKey::Rating => b.effective_rating().total_cmp(&a.effective_rating()),
    }
}

/// Sort offers by a key, returning a new list.
///
/// The sort is stable: offers that compare equal keep their input order.
pub fn sort(results: &[Arc<Offer>], key: SortKey) -> Vec<Arc<Offer>> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OfferKind;

    fn bus(id: &str, price: f64, departure: &str) -> Arc<Offer> {
        Arc::new(Offer::new(id, OfferKind::Bus, "Op", "AC Sleeper", departure, price))
    }

    fn ids(offers: &[Arc<Offer>]) -> Vec<&str> {
        offers.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn price_ascending() {
        let a = Arc::new(
            Offer::new("A", OfferKind::Bus, "VRL Travels", "AC Sleeper", "22:00", 800.0)
                .with_rating(4.2),
        );
        let b = Arc::new(
            Offer::new("B", OfferKind::Bus, "RedBus Express", "Non-AC Seater", "06:00", 450.0)
                .with_rating(3.8),
        );

        let sorted = sort(&[a, b], SortKey::Price);
        assert_eq!(ids(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn duration_uses_fallback() {
        let short = Arc::new(Offer::new("S", OfferKind::Bus, "Op", "Seater", "10:00", 1.0).with_duration(240));
        let unknown = Arc::new(Offer::new("U", OfferKind::Bus, "Op", "Seater", "10:00", 1.0));
        let long = Arc::new(Offer::new("L", OfferKind::Bus, "Op", "Seater", "10:00", 1.0).with_duration(400));

        let sorted = sort(&[long, unknown, short], SortKey::Duration);
        // unknown counts as 360
        assert_eq!(ids(&sorted), vec!["S", "U", "L"]);
    }

    #[test]
    fn departure_compares_labels() {
        let sorted = sort(
            &[
                bus("late", 1.0, "2024-12-15T23:30:00"),
                bus("early", 1.0, "06:00"),
                bus("noon", 1.0, "12:00:00"),
            ],
            SortKey::Departure,
        );
        assert_eq!(ids(&sorted), vec!["early", "noon", "late"]);
    }

    #[test]
    fn departure_malformed_sorts_by_raw_text() {
        // Digits sort before letters
        let sorted = sort(
            &[bus("bad", 1.0, "unknown"), bus("ok", 1.0, "23:00")],
            SortKey::Departure,
        );
        assert_eq!(ids(&sorted), vec!["ok", "bad"]);
    }

    #[test]
    fn rating_descending_with_fallback() {
        let high = Arc::new(Offer::new("H", OfferKind::Bus, "Op", "Seater", "10:00", 1.0).with_rating(4.6));
        let none = Arc::new(Offer::new("N", OfferKind::Bus, "Op", "Seater", "10:00", 1.0));
        let low = Arc::new(Offer::new("L", OfferKind::Bus, "Op", "Seater", "10:00", 1.0).with_rating(3.1));

        let sorted = sort(&[low, none, high], SortKey::Rating);
        assert_eq!(ids(&sorted), vec!["H", "N", "L"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorted = sort(
            &[bus("1", 500.0, "10:00"), bus("2", 300.0, "10:00"), bus("3", 500.0, "09:00"), bus("4", 300.0, "08:00")],
            SortKey::Price,
        );
        assert_eq!(ids(&sorted), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![bus("A", 800.0, "22:00"), bus("B", 450.0, "06:00")];
        let _ = sort(&input, SortKey::Price);
        assert_eq!(ids(&input), vec!["A", "B"]);
    }

    #[test]
    fn parse_sort_keys() {
        assert_eq!("price".parse(), Ok(SortKey::Price));
        assert_eq!("Duration".parse(), Ok(SortKey::Duration));
        assert_eq!("departure".parse(), Ok(SortKey::Departure));
        assert_eq!("RATING".parse(), Ok(SortKey::Rating));
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(InvalidSortKey("cheapest".into()))
        );
        assert_eq!(SortKey::default(), SortKey::Price);
    }

    #[test]
    fn display_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse(), Ok(key));
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(
            InvalidSortKey("cheapest".into()).to_string(),
            "unknown sort key: \"cheapest\""
        );
    }
}
