//! Search criteria understood by the booking backend.

use chrono::NaiveDate;

use crate::domain::OfferKind;

/// Guests assumed when a hotel search does not say.
pub const DEFAULT_GUESTS: u32 = 1;

/// What to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    Bus {
        origin: String,
        destination: String,
        date: NaiveDate,
    },
    Flight {
        from: String,
        to: String,
        date: NaiveDate,
    },
}

impl SearchCriteria {
    pub fn bus(origin: impl Into<String>, destination: impl Into<String>, date: NaiveDate) -> Self {
        SearchCriteria::Bus {
            origin: origin.into(),
            destination: destination.into(),
            date,
        }
    }

    pub fn flight(from: impl Into<String>, to: impl Into<String>, date: NaiveDate) -> Self {
        SearchCriteria::Flight {
            from: from.into(),
            to: to.into(),
            date,
        }
    }

    pub fn kind(&self) -> OfferKind {
        match self {
            SearchCriteria::Bus { .. } => OfferKind::Bus,
            SearchCriteria::Flight { .. } => OfferKind::Flight,
        }
    }

    /// Endpoint path, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            SearchCriteria::Bus { .. } => "/v1/buses/search",
            SearchCriteria::Flight { .. } => "/v1/flights/search",
        }
    }

    /// Query parameters for the search endpoint.
    ///
    /// The bus endpoint binds `date` to a LocalDateTime, so it is sent as
    /// midnight of the requested day. The flight endpoint takes a bare date.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            SearchCriteria::Bus {
                origin,
                destination,
                date,
            } => vec![
                ("origin", origin.clone()),
                ("destination", destination.clone()),
                ("date", date.format("%Y-%m-%dT00:00:00").to_string()),
            ],
            SearchCriteria::Flight { from, to, date } => vec![
                ("from", from.clone()),
                ("to", to.clone()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ],
        }
    }

    /// Origin and destination, whatever the kind.
    pub fn route(&self) -> (&str, &str) {
        match self {
            SearchCriteria::Bus {
                origin,
                destination,
                ..
            } => (origin.as_str(), destination.as_str()),
            SearchCriteria::Flight { from, to, .. } => (from.as_str(), to.as_str()),
        }
    }
}

/// Hotel search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelCriteria {
    pub city: String,
    pub guests: u32,
}

impl HotelCriteria {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            guests: DEFAULT_GUESTS,
        }
    }

    pub fn with_guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("city", self.city.clone()),
            ("guests", self.guests.to_string()),
        ]
    }
}
