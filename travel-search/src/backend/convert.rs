//! Conversion from backend DTOs to domain types.
//!
//! Each record is validated on its own. A record that breaks the data model
//! (negative price, rating off the 0-5 scale, ...) is skipped with a warning
//! instead of failing the whole search; the caller still gets every usable
//! offer. An unreadable timestamp is *not* a conversion error: the offer is
//! kept and simply never matches a departure-slot filter.

use tracing::warn;

use crate::domain::{HotelOffer, MAX_RATING, Offer, OfferClass, OfferKind, OfferTime};

use super::types::{BusDto, FlightDto, HotelDto, WireId};

/// Cabin class assumed for flights the backend sends without one.
pub const DEFAULT_FLIGHT_CLASS: &str = "Economy";

/// Error converting a single backend record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("record has a missing or empty id")]
    EmptyId,

    #[error("record {id}: missing price")]
    MissingPrice { id: String },

    #[error("record {id}: invalid price {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("record {id}: {field} out of range (got {value})")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: i64,
    },

    #[error("record {id}: rating {rating} is outside 0..=5")]
    InvalidRating { id: String, rating: f64 },
}

/// Convert a bus record.
pub fn convert_bus(dto: BusDto) -> Result<Offer, ConversionError> {
    let id = record_id(dto.id.as_ref())?;
    let price = checked_price(&id, dto.price)?;
    let available_seats = checked_count(&id, "availableSeats", dto.available_seats)?;
    let rating = checked_rating(&id, dto.rating)?;

    let departure = OfferTime::parse(dto.departure_time.unwrap_or_default());
    let arrival = OfferTime::parse(dto.arrival_time.unwrap_or_default());
    let duration_minutes = resolve_duration(
        &id,
        dto.duration_minutes,
        dto.duration.as_deref(),
        &departure,
        &arrival,
    )?;

    Ok(Offer {
        id,
        kind: OfferKind::Bus,
        operator: dto.operator.unwrap_or_default(),
        class: OfferClass::new(dto.bus_type.unwrap_or_default()),
        origin: dto.origin.unwrap_or_default(),
        destination: dto.destination.unwrap_or_default(),
        departure,
        arrival,
        price,
        available_seats,
        rating,
        duration_minutes,
        amenities: dto.amenities,
    })
}

/// Convert a flight record.
pub fn convert_flight(dto: FlightDto) -> Result<Offer, ConversionError> {
    let id = record_id(dto.id.as_ref())?;
    let price = checked_price(&id, dto.price)?;
    let available_seats = checked_count(&id, "availableSeats", dto.available_seats)?;
    let rating = checked_rating(&id, dto.rating)?;

    let departure = OfferTime::parse(dto.departure_time.unwrap_or_default());
    let arrival = OfferTime::parse(dto.arrival_time.unwrap_or_default());
    let duration_minutes = resolve_duration(
        &id,
        dto.duration_minutes,
        dto.duration.as_deref(),
        &departure,
        &arrival,
    )?;

    let class = dto
        .class
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FLIGHT_CLASS.to_string());

    Ok(Offer {
        id,
        kind: OfferKind::Flight,
        operator: dto.airline.unwrap_or_default(),
        class: OfferClass::new(class),
        origin: dto.departure_city.unwrap_or_default(),
        destination: dto.arrival_city.unwrap_or_default(),
        departure,
        arrival,
        price,
        available_seats,
        rating,
        duration_minutes,
        amenities: Vec::new(),
    })
}

/// Convert a hotel record.
pub fn convert_hotel(dto: HotelDto) -> Result<HotelOffer, ConversionError> {
    let id = record_id(dto.id.as_ref())?;
    let nightly_rate = checked_price(&id, dto.nightly_rate)?;
    let available_rooms = checked_count(&id, "availableRooms", dto.available_rooms)?;
    let rating = checked_rating(&id, dto.rating)?;

    let amenities = dto
        .amenities
        .as_deref()
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(HotelOffer {
        id,
        name: dto.name.unwrap_or_default(),
        city: dto.city.unwrap_or_default(),
        address: dto.address,
        room_type: dto.room_type,
        nightly_rate,
        available_rooms,
        rating,
        star_rating: dto.star_rating,
        amenities,
        breakfast_included: dto.breakfast_included.unwrap_or(false),
        free_cancellation: dto.free_cancellation.unwrap_or(false),
    })
}

/// Convert a batch of records, dropping (and logging) the ones that fail.
pub fn convert_all<D, T>(
    dtos: Vec<D>,
    convert: impl Fn(D) -> Result<T, ConversionError>,
) -> Vec<T> {
    let total = dtos.len();
    let converted: Vec<T> = dtos
        .into_iter()
        .filter_map(|dto| match convert(dto) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "skipping backend record");
                None
            }
        })
        .collect();

    if converted.len() < total {
        warn!(
            kept = converted.len(),
            skipped = total - converted.len(),
            "backend response contained invalid records"
        );
    }

    converted
}

/// Parse a human duration like "6h 30m", "4h", "45m" or "2h30m".
pub fn parse_duration_label(label: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut digits: Option<u32> = None;
    let mut saw_unit = false;

    for c in label.trim().chars() {
        match c {
            '0'..='9' => {
                let d = c.to_digit(10)?;
                digits = Some(digits.unwrap_or(0).checked_mul(10)?.checked_add(d)?);
            }
            'h' | 'H' => {
                total = total.checked_add(digits.take()?.checked_mul(60)?)?;
                saw_unit = true;
            }
            'm' | 'M' => {
                total = total.checked_add(digits.take()?)?;
                saw_unit = true;
            }
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }

    // Trailing digits without a unit are ambiguous
    if digits.is_some() || !saw_unit {
        return None;
    }
    Some(total)
}

fn record_id(id: Option<&WireId>) -> Result<String, ConversionError> {
    let id = id.ok_or(ConversionError::EmptyId)?.to_string();
    if id.trim().is_empty() {
        return Err(ConversionError::EmptyId);
    }
    Ok(id)
}

fn checked_price(id: &str, price: Option<f64>) -> Result<f64, ConversionError> {
    let price = price.ok_or_else(|| ConversionError::MissingPrice { id: id.to_string() })?;
    if !price.is_finite() || price < 0.0 {
        return Err(ConversionError::InvalidPrice {
            id: id.to_string(),
            price,
        });
    }
    // -0.0 would order before 0.0 under total_cmp
    Ok(price + 0.0)
}

fn checked_count(id: &str, field: &'static str, value: Option<i64>) -> Result<u32, ConversionError> {
    let value = value.unwrap_or(0);
    u32::try_from(value).map_err(|_| ConversionError::OutOfRange {
        id: id.to_string(),
        field,
        value,
    })
}

fn checked_rating(id: &str, rating: Option<f64>) -> Result<Option<f64>, ConversionError> {
    match rating {
        Some(r) if !(0.0..=MAX_RATING).contains(&r) => Err(ConversionError::InvalidRating {
            id: id.to_string(),
            rating: r,
        }),
        other => Ok(other.map(|r| r + 0.0)),
    }
}

/// Explicit minutes win, then the human label, then the gap between two
/// full datetimes. Otherwise the duration stays unknown.
fn resolve_duration(
    id: &str,
    minutes: Option<i64>,
    label: Option<&str>,
    departure: &OfferTime,
    arrival: &OfferTime,
) -> Result<Option<u32>, ConversionError> {
    if let Some(value) = minutes {
        return u32::try_from(value)
            .map(Some)
            .map_err(|_| ConversionError::OutOfRange {
                id: id.to_string(),
                field: "durationMinutes",
                value,
            });
    }

    Ok(label
        .and_then(parse_duration_label)
        .or_else(|| departure.minutes_until(arrival)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus_dto(json: &str) -> BusDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn convert_seeded_bus() {
        let dto = bus_dto(
            r#"{
                "id": "BUS001", "operator": "VRL Travels", "busType": "AC Sleeper",
                "origin": "Mumbai", "destination": "Pune",
                "departureTime": "22:00", "arrivalTime": "04:30", "duration": "6h 30m",
                "price": 800, "availableSeats": 25, "amenities": ["AC", "WiFi"]
            }"#,
        );
        let offer = convert_bus(dto).unwrap();

        assert_eq!(offer.id, "BUS001");
        assert_eq!(offer.kind, OfferKind::Bus);
        assert_eq!(offer.class.as_str(), "AC Sleeper");
        assert_eq!(offer.departure.label(), "22:00");
        assert_eq!(offer.price, 800.0);
        assert_eq!(offer.available_seats, 25);
        assert_eq!(offer.duration_minutes, Some(390));
        assert_eq!(offer.rating, None);
        assert_eq!(offer.effective_rating(), 4.0);
    }

    #[test]
    fn explicit_minutes_beat_label() {
        let dto = bus_dto(
            r#"{"id": 1, "price": 100, "duration": "6h", "durationMinutes": 300}"#,
        );
        assert_eq!(convert_bus(dto).unwrap().duration_minutes, Some(300));
    }

    #[test]
    fn duration_from_datetimes() {
        let dto = FlightDto {
            id: Some(WireId::Number(3)),
            flight_number: Some("AI-101".into()),
            airline: Some("Air India".into()),
            departure_city: Some("Delhi".into()),
            arrival_city: Some("Mumbai".into()),
            departure_time: Some("2024-12-15T09:00:00".into()),
            arrival_time: Some("2024-12-15T11:10:00".into()),
            price: Some(5200.0),
            available_seats: Some(50),
            class: None,
            duration: None,
            duration_minutes: None,
            rating: None,
        };
        let offer = convert_flight(dto).unwrap();

        assert_eq!(offer.id, "3");
        assert_eq!(offer.kind, OfferKind::Flight);
        assert_eq!(offer.operator, "Air India");
        assert_eq!(offer.class.as_str(), DEFAULT_FLIGHT_CLASS);
        assert_eq!(offer.origin, "Delhi");
        assert_eq!(offer.duration_minutes, Some(130));
    }

    #[test]
    fn unknown_duration_stays_absent() {
        let dto = bus_dto(r#"{"id": 1, "price": 100, "departureTime": "10:00", "arrivalTime": "14:00"}"#);
        let offer = convert_bus(dto).unwrap();
        assert_eq!(offer.duration_minutes, None);
        assert_eq!(offer.effective_duration_minutes(), 360);
    }

    #[test]
    fn malformed_departure_is_kept() {
        let dto = bus_dto(r#"{"id": 1, "price": 100, "departureTime": "soon"}"#);
        let offer = convert_bus(dto).unwrap();
        assert!(offer.departure.is_malformed());
        assert_eq!(offer.departure.raw(), "soon");
    }

    #[test]
    fn invalid_records_are_rejected() {
        let missing = bus_dto(r#"{"id": 1}"#);
        assert_eq!(
            convert_bus(missing),
            Err(ConversionError::MissingPrice { id: "1".into() })
        );

        let negative = bus_dto(r#"{"id": 2, "price": -10}"#);
        assert!(matches!(
            convert_bus(negative),
            Err(ConversionError::InvalidPrice { .. })
        ));

        let seats = bus_dto(r#"{"id": 3, "price": 10, "availableSeats": -1}"#);
        assert_eq!(
            convert_bus(seats),
            Err(ConversionError::OutOfRange {
                id: "3".into(),
                field: "availableSeats",
                value: -1
            })
        );

        let rating = bus_dto(r#"{"id": 4, "price": 10, "rating": 9.5}"#);
        assert!(matches!(
            convert_bus(rating),
            Err(ConversionError::InvalidRating { .. })
        ));

        let empty = bus_dto(r#"{"id": " ", "price": 10}"#);
        assert_eq!(convert_bus(empty), Err(ConversionError::EmptyId));
    }

    #[test]
    fn convert_all_skips_bad_rows() {
        let dtos = vec![
            bus_dto(r#"{"id": "A", "price": 800}"#),
            bus_dto(r#"{"id": "B", "price": -1}"#),
            bus_dto(r#"{"id": "C", "price": 450}"#),
        ];
        let offers = convert_all(dtos, convert_bus);
        let ids: Vec<_> = offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn convert_all_skips_rows_without_id() {
        let dtos: Vec<BusDto> = serde_json::from_str(
            r#"[
                {"price": 100},
                {"id": "A", "price": 200},
                {"id": "B", "price": 300, "amenities": null}
            ]"#,
        )
        .unwrap();
        let offers = convert_all(dtos, convert_bus);
        let ids: Vec<_> = offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn negative_zero_price_is_normalised() {
        let a = convert_bus(bus_dto(r#"{"id": "A", "price": -0.0, "rating": -0.0}"#)).unwrap();
        assert!(a.price.is_sign_positive());
        assert!(a.rating.is_some_and(|r| r.is_sign_positive()));

        let b = convert_bus(bus_dto(r#"{"id": "B", "price": 0.0}"#)).unwrap();
        assert_eq!(a.price.total_cmp(&b.price), std::cmp::Ordering::Equal);
    }

    #[test]
    fn convert_hotel_splits_amenities() {
        let dto: HotelDto = serde_json::from_str(
            r#"{"id": 9, "name": "Sea View", "city": "Goa", "nightlyRate": 4200,
                "availableRooms": 3, "amenities": "WiFi, Pool,, Gym ", "freeCancellation": true}"#,
        )
        .unwrap();
        let hotel = convert_hotel(dto).unwrap();
        assert_eq!(hotel.amenities, vec!["WiFi", "Pool", "Gym"]);
        assert!(hotel.free_cancellation);
        assert!(!hotel.breakfast_included);
        assert_eq!(hotel.nightly_rate, 4200.0);
    }

    #[test]
    fn duration_labels() {
        assert_eq!(parse_duration_label("6h 30m"), Some(390));
        assert_eq!(parse_duration_label("4h"), Some(240));
        assert_eq!(parse_duration_label("45m"), Some(45));
        assert_eq!(parse_duration_label("15h 40m"), Some(940));
        assert_eq!(parse_duration_label("2h30m"), Some(150));

        assert_eq!(parse_duration_label(""), None);
        assert_eq!(parse_duration_label("90"), None);
        assert_eq!(parse_duration_label("h"), None);
        assert_eq!(parse_duration_label("about 4h"), None);
    }

    #[test]
    fn error_display() {
        let err = ConversionError::OutOfRange {
            id: "BUS9".into(),
            field: "availableSeats",
            value: -2,
        };
        assert_eq!(
            err.to_string(),
            "record BUS9: availableSeats out of range (got -2)"
        );
    }
}
