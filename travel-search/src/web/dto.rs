//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DepartureSlot, HotelOffer, Offer};
use crate::session::View;

/// Request to search for buses.
#[derive(Debug, Deserialize)]
pub struct BusSearchRequest {
    /// Origin city
    pub origin: String,

    /// Destination city
    pub destination: String,

    /// Travel date, YYYY-MM-DD
    pub date: String,

    /// Comma-separated bus types
    pub class: Option<String>,

    /// Comma-separated departure slots
    pub slot: Option<String>,

    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,

    /// Sort key name
    pub sort: Option<String>,
}

impl BusSearchRequest {
    pub fn filters(&self) -> FilterParams {
        FilterParams {
            classes: split_list(self.class.as_deref()),
            slots: split_list(self.slot.as_deref()),
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            sort: self.sort.clone(),
        }
    }
}

/// Request to search for flights.
#[derive(Debug, Deserialize)]
pub struct FlightSearchRequest {
    /// Departure city
    pub from: String,

    /// Arrival city
    pub to: String,

    /// Travel date, YYYY-MM-DD
    pub date: String,

    /// Comma-separated cabin classes
    pub class: Option<String>,

    /// Comma-separated departure slots
    pub slot: Option<String>,

    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,

    /// Sort key name
    pub sort: Option<String>,
}

impl FlightSearchRequest {
    pub fn filters(&self) -> FilterParams {
        FilterParams {
            classes: split_list(self.class.as_deref()),
            slots: split_list(self.slot.as_deref()),
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            sort: self.sort.clone(),
        }
    }
}

/// Filter and sort choices taken from a search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub classes: Vec<String>,
    pub slots: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort: Option<String>,
}

/// Split a comma-separated query value, dropping blanks and repeats.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.unwrap_or_default().split(',') {
        let item = item.trim();
        if !item.is_empty() && !items.iter().any(|i| i == item) {
            items.push(item.to_string());
        }
    }
    items
}

/// Request to search for hotels.
#[derive(Debug, Deserialize)]
pub struct HotelSearchRequest {
    pub city: String,

    /// Defaults to 1
    pub guests: Option<u32>,
}

/// A bus or flight in search results.
#[derive(Debug, Serialize)]
pub struct OfferResult {
    pub id: String,

    /// "bus" or "flight"
    pub kind: &'static str,

    pub operator: String,

    /// Bus type or cabin class
    pub class: String,

    pub origin: String,

    pub destination: String,

    /// "HH:MM", or the backend's text if it could not be read
    pub departure: String,

    /// Slot the departure falls in
    pub departure_slot: Option<&'static str>,

    pub arrival: Option<String>,

    pub price: f64,

    pub available_seats: u32,

    /// Rating with the fallback applied
    pub rating: f64,

    /// Duration with the fallback applied
    pub duration_minutes: u32,

    pub amenities: Vec<String>,
}

/// Filtered and sorted search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Offers shown after filtering
    pub count: usize,

    /// Offers the backend returned
    pub total: usize,

    /// Filter categories narrowing the results
    pub active_filters: usize,

    /// Sort key applied
    pub sort: &'static str,

    pub offers: Vec<OfferResult>,
}

/// A hotel in search results.
#[derive(Debug, Serialize)]
pub struct HotelResult {
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

/// Hotel search results, in backend order.
#[derive(Debug, Serialize)]
pub struct HotelSearchResponse {
    pub count: usize,
    pub hotels: Vec<HotelResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl OfferResult {
    /// Create from a domain Offer.
    pub fn from_offer(offer: &Offer) -> Self {
        let arrival = (!offer.arrival.raw().trim().is_empty())
            .then(|| offer.arrival.label().to_string());

        Self {
            id: offer.id.clone(),
            kind: offer.kind.as_str(),
            operator: offer.operator.clone(),
            class: offer.class.as_str().to_string(),
            origin: offer.origin.clone(),
            destination: offer.destination.clone(),
            departure: offer.departure.label().to_string(),
            departure_slot: offer.departure.clock().map(|t| DepartureSlot::of(t).as_str()),
            arrival,
            price: offer.price,
            available_seats: offer.available_seats,
            rating: offer.effective_rating(),
            duration_minutes: offer.effective_duration_minutes(),
            amenities: offer.amenities.clone(),
        }
    }
}

impl SearchResponse {
    /// Create from a session view.
    pub fn from_view(view: &View, total: usize, active_filters: usize, sort: &'static str) -> Self {
        let offers: Vec<OfferResult> = view.iter().map(|o| OfferResult::from_offer(o)).collect();
        Self {
            count: offers.len(),
            total,
            active_filters,
            sort,
            offers,
        }
    }
}

impl From<HotelOffer> for HotelResult {
    fn from(hotel: HotelOffer) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            city: hotel.city,
            address: hotel.address,
            room_type: hotel.room_type,
            nightly_rate: hotel.nightly_rate,
            available_rooms: hotel.available_rooms,
            rating: hotel.rating,
            star_rating: hotel.star_rating,
            amenities: hotel.amenities,
            breakfast_included: hotel.breakfast_included,
            free_cancellation: hotel.free_cancellation,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::OfferKind;

    #[test]
    fn split_list_trims_and_dedupes() {
        assert_eq!(
            split_list(Some("AC Sleeper, Non-AC Seater,,AC Sleeper ")),
            vec!["AC Sleeper".to_string(), "Non-AC Seater".to_string()]
        );
        assert!(split_list(Some(" , ")).is_empty());
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn bus_request_filters() {
        let req: BusSearchRequest = serde_json::from_value(serde_json::json!({
            "origin": "Mumbai",
            "destination": "Pune",
            "date": "2024-12-15",
            "slot": "morning,evening",
            "max_price": 600.0,
            "sort": "rating"
        }))
        .unwrap();

        let filters = req.filters();
        assert!(filters.classes.is_empty());
        assert_eq!(filters.slots, vec!["morning", "evening"]);
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.max_price, Some(600.0));
        assert_eq!(filters.sort.as_deref(), Some("rating"));
    }

    #[test]
    fn offer_result_applies_fallbacks() {
        let offer = Offer::new("A", OfferKind::Bus, "VRL Travels", "AC Sleeper", "22:00", 800.0)
            .with_route("Mumbai", "Pune");
        let result = OfferResult::from_offer(&offer);

        assert_eq!(result.kind, "bus");
        assert_eq!(result.departure, "22:00");
        assert_eq!(result.departure_slot, Some("evening"));
        assert_eq!(result.arrival, None);
        assert_eq!(result.rating, 4.0);
        assert_eq!(result.duration_minutes, 360);
    }

    #[test]
    fn offer_result_keeps_malformed_departure_text() {
        let offer = Offer::new("X", OfferKind::Flight, "Indigo", "Economy", "TBA", 3000.0)
            .with_arrival("2024-12-15T08:10:00");
        let result = OfferResult::from_offer(&offer);

        assert_eq!(result.departure, "TBA");
        assert_eq!(result.departure_slot, None);
        assert_eq!(result.arrival.as_deref(), Some("08:10"));
    }

    #[test]
    fn search_response_counts() {
        let view: View = vec![Arc::new(Offer::new(
            "B",
            OfferKind::Bus,
            "RedBus Express",
            "Non-AC Seater",
            "06:00",
            450.0,
        ))]
        .into();
        let response = SearchResponse::from_view(&view, 2, 1, "price");

        assert_eq!(response.count, 1);
        assert_eq!(response.total, 2);
        assert_eq!(response.active_filters, 1);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["offers"][0]["departure_slot"], "morning");
    }
}
