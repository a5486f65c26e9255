//! Bookable offers returned by a search.

use std::fmt;

use super::OfferTime;

/// Rating assumed for an offer the backend sent without one.
pub const DEFAULT_RATING: f64 = 4.0;

/// Journey length assumed for an offer the backend sent without one.
pub const DEFAULT_DURATION_MINUTES: u32 = 360;

/// What kind of transport an offer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferKind {
    Bus,
    Flight,
}

impl OfferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferKind::Bus => "bus",
            OfferKind::Flight => "flight",
        }
    }
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat or cabin classifier, e.g. "AC Sleeper", "Non-AC Seater", "Economy".
///
/// The set of classes is owned by the backend, so this is an open string
/// rather than a closed enum. Comparison is exact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OfferClass(String);

impl OfferClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OfferClass {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for OfferClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single bus or flight offer.
///
/// Offers are produced by the backend conversion layer, which guarantees a
/// non-negative price and a rating within [0, 5] when one is present.
/// Optional fields have documented fallbacks; use the `effective_*`
/// accessors rather than reading them directly when comparing offers.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    /// Identifier, unique within one result set.
    pub id: String,

    pub kind: OfferKind,

    /// Operator or airline name.
    pub operator: String,

    pub class: OfferClass,

    pub origin: String,

    pub destination: String,

    pub departure: OfferTime,

    pub arrival: OfferTime,

    pub price: f64,

    pub available_seats: u32,

    /// Rating out of 5, if the backend has one.
    pub rating: Option<f64>,

    /// Journey length, if known.
    pub duration_minutes: Option<u32>,

    /// Display-only amenity labels (WiFi, Charging Point, ...).
    pub amenities: Vec<String>,
}

impl Offer {
    /// Create an offer with the required fields; everything else is empty
    /// or absent.
    pub fn new(
        id: impl Into<String>,
        kind: OfferKind,
        operator: impl Into<String>,
        class: impl Into<OfferClass>,
        departure: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            operator: operator.into(),
            class: class.into(),
            origin: String::new(),
            destination: String::new(),
            departure: OfferTime::parse(departure),
            arrival: OfferTime::parse(""),
            price,
            available_seats: 0,
            rating: None,
            duration_minutes: None,
            amenities: Vec::new(),
        }
    }

    pub fn with_route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = origin.into();
        self.destination = destination.into();
        self
    }

    pub fn with_arrival(mut self, arrival: impl Into<String>) -> Self {
        self.arrival = OfferTime::parse(arrival);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.available_seats = seats;
        self
    }

    /// Rating, or [`DEFAULT_RATING`] when absent.
    pub fn effective_rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_RATING)
    }

    /// Duration in minutes, or [`DEFAULT_DURATION_MINUTES`] when absent.
    pub fn effective_duration_minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

/// A hotel room offer.
///
/// Hotels have no departure time, so they are not run through the
/// filter-and-sort pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub room_type: Option<String>,
    pub nightly_rate: f64,
    pub available_rooms: u32,
    pub rating: Option<f64>,
    pub star_rating: Option<String>,
    pub amenities: Vec<String>,
    pub breakfast_included: bool,
    pub free_cancellation: bool,
}
