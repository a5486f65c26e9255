//! Booking backend response DTOs.
//!
//! These types map directly to the backend's JSON. Almost everything is
//! `Option` because inventory records are entered by hand and fields go
//! missing; validation happens during conversion, one record at a time, so
//! a single bad row never sinks a whole response.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Record identifier. Database-backed rows use numbers, seeded inventory
/// uses strings like "BUS001".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

/// Treat an explicit `null` list the same as an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A bus from `/v1/buses/search` or `/v1/buses/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusDto {
    /// Missing ids are rejected during conversion, not decoding.
    pub id: Option<WireId>,

    /// Registration or route number.
    pub bus_number: Option<String>,

    pub operator: Option<String>,

    /// Seating classifier, e.g. "AC Sleeper".
    pub bus_type: Option<String>,

    pub origin: Option<String>,

    pub destination: Option<String>,

    /// "HH:MM" or ISO 8601 datetime.
    pub departure_time: Option<String>,

    pub arrival_time: Option<String>,

    /// Human-readable length, e.g. "6h 30m".
    pub duration: Option<String>,

    pub duration_minutes: Option<i64>,

    pub price: Option<f64>,

    pub available_seats: Option<i64>,

    pub rating: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<String>,
}

/// A flight from `/v1/flights/search` or `/v1/flights/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub id: Option<WireId>,

    /// e.g. "6E-2011"
    pub flight_number: Option<String>,

    pub airline: Option<String>,

    pub departure_city: Option<String>,

    pub arrival_city: Option<String>,

    pub departure_time: Option<String>,

    pub arrival_time: Option<String>,

    pub price: Option<f64>,

    pub available_seats: Option<i64>,

    /// Cabin class. Absent for most inventory, which is economy.
    pub class: Option<String>,

    pub duration: Option<String>,

    pub duration_minutes: Option<i64>,

    pub rating: Option<f64>,
}

/// A hotel from `/v1/hotels/search`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDto {
    pub id: Option<WireId>,

    pub name: Option<String>,

    pub city: Option<String>,

    pub address: Option<String>,

    /// e.g. "Deluxe", "Suite"
    pub room_type: Option<String>,

    pub nightly_rate: Option<f64>,

    pub total_rooms: Option<i64>,

    pub available_rooms: Option<i64>,

    pub rating: Option<f64>,

    /// Comma-separated, e.g. "WiFi, Pool, Gym".
    pub amenities: Option<String>,

    /// e.g. "4-star"
    pub star_rating: Option<String>,

    pub breakfast_included: Option<bool>,

    pub free_cancellation: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_seeded_bus() {
        let json = r#"{
            "id": "BUS001",
            "operator": "VRL Travels",
            "busType": "AC Sleeper",
            "origin": "Mumbai",
            "destination": "Pune",
            "departureTime": "22:00",
            "arrivalTime": "04:30",
            "duration": "6h 30m",
            "price": 800,
            "availableSeats": 25,
            "amenities": ["AC", "WiFi"]
        }"#;
        let bus: BusDto = serde_json::from_str(json).unwrap();
        assert_eq!(bus.id, Some(WireId::Text("BUS001".into())));
        assert_eq!(bus.bus_type.as_deref(), Some("AC Sleeper"));
        assert_eq!(bus.price, Some(800.0));
        assert_eq!(bus.available_seats, Some(25));
        assert_eq!(bus.amenities.len(), 2);
        assert!(bus.rating.is_none());
    }

    #[test]
    fn deserialize_database_bus() {
        let json = r#"{
            "id": 7,
            "busNumber": "MH-12-AB-1234",
            "operator": "MSRTC",
            "origin": "Mumbai",
            "destination": "Nashik",
            "departureTime": "2024-12-15T07:15:00",
            "arrivalTime": "2024-12-15T11:45:00",
            "price": 350.5,
            "availableSeats": 40
        }"#;
        let bus: BusDto = serde_json::from_str(json).unwrap();
        assert_eq!(bus.id, Some(WireId::Number(7)));
        assert!(bus.amenities.is_empty());
        assert!(bus.bus_type.is_none());
    }

    #[test]
    fn rows_with_gaps_still_decode() {
        let json = r#"[
            {"price": 100},
            {"id": "A", "price": 200},
            {"id": "B", "price": 300, "amenities": null}
        ]"#;
        let buses: Vec<BusDto> = serde_json::from_str(json).unwrap();
        assert_eq!(buses.len(), 3);
        assert_eq!(buses[0].id, None);
        assert!(buses[2].amenities.is_empty());
    }

    #[test]
    fn deserialize_flight() {
        let json = r#"{
            "id": 3,
            "flightNumber": "AI-101",
            "airline": "Air India",
            "departureCity": "Delhi",
            "arrivalCity": "Mumbai",
            "departureTime": "2024-12-15T09:00:00",
            "arrivalTime": "2024-12-15T11:10:00",
            "price": 5200.00,
            "availableSeats": 50
        }"#;
        let flight: FlightDto = serde_json::from_str(json).unwrap();
        assert_eq!(flight.airline.as_deref(), Some("Air India"));
        assert!(flight.class.is_none());
    }

    #[test]
    fn deserialize_hotel() {
        let json = r#"{
            "id": 1,
            "name": "Sea View",
            "city": "Goa",
            "roomType": "Deluxe",
            "nightlyRate": 4200,
            "availableRooms": 3,
            "amenities": "WiFi, Pool",
            "breakfastIncluded": true
        }"#;
        let hotel: HotelDto = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.amenities.as_deref(), Some("WiFi, Pool"));
        assert_eq!(hotel.free_cancellation, None);
    }
}
