//! Mock booking backend for running without a live API.
//!
//! Loads inventory from JSON files in the backend's own wire format and
//! serves searches from it as if they were live responses.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{HotelOffer, Offer};

use super::convert::{convert_all, convert_bus, convert_flight, convert_hotel};
use super::criteria::{HotelCriteria, SearchCriteria};
use super::error::BackendError;
use super::types::{BusDto, FlightDto, HotelDto};

#[derive(Debug, Default)]
struct Inventory {
    buses: Vec<BusDto>,
    flights: Vec<FlightDto>,
    hotels: Vec<HotelDto>,
}

/// Mock booking backend serving data from memory.
///
/// Searches match origin/destination (or city) case-insensitively and
/// ignore dates; mock inventory runs every day.
#[derive(Debug, Clone, Default)]
pub struct MockBookingApi {
    inventory: Arc<Inventory>,
}

impl MockBookingApi {
    /// Load inventory from a directory.
    ///
    /// Reads `buses.json`, `flights.json` and `hotels.json`, each a JSON
    /// array of backend records. Missing files are treated as empty, but at
    /// least one must exist.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, BackendError> {
        let data_dir = data_dir.as_ref();

        let buses: Option<Vec<BusDto>> = load_file(&data_dir.join("buses.json"))?;
        let flights: Option<Vec<FlightDto>> = load_file(&data_dir.join("flights.json"))?;
        let hotels: Option<Vec<HotelDto>> = load_file(&data_dir.join("hotels.json"))?;

        if buses.is_none() && flights.is_none() && hotels.is_none() {
            return Err(BackendError::NotConfigured(format!(
                "no mock inventory files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self::from_records(
            buses.unwrap_or_default(),
            flights.unwrap_or_default(),
            hotels.unwrap_or_default(),
        ))
    }

    /// Build a mock from records already in memory.
    pub fn from_records(buses: Vec<BusDto>, flights: Vec<FlightDto>, hotels: Vec<HotelDto>) -> Self {
        Self {
            inventory: Arc::new(Inventory {
                buses,
                flights,
                hotels,
            }),
        }
    }

    /// Mimics `BookingApiClient::search_offers`.
    pub async fn search_offers(&self, criteria: &SearchCriteria) -> Result<Vec<Offer>, BackendError> {
        let (origin, destination) = criteria.route();

        let offers = match criteria {
            SearchCriteria::Bus { .. } => {
                let matching: Vec<BusDto> = self
                    .inventory
                    .buses
                    .iter()
                    .filter(|b| {
                        same_place(b.origin.as_deref(), origin)
                            && same_place(b.destination.as_deref(), destination)
                    })
                    .cloned()
                    .collect();
                convert_all(matching, convert_bus)
            }
            SearchCriteria::Flight { .. } => {
                let matching: Vec<FlightDto> = self
                    .inventory
                    .flights
                    .iter()
                    .filter(|f| {
                        same_place(f.departure_city.as_deref(), origin)
                            && same_place(f.arrival_city.as_deref(), destination)
                    })
                    .cloned()
                    .collect();
                convert_all(matching, convert_flight)
            }
        };

        Ok(offers)
    }

    /// Mimics `BookingApiClient::search_hotels`. Guest count is ignored.
    pub async fn search_hotels(
        &self,
        criteria: &HotelCriteria,
    ) -> Result<Vec<HotelOffer>, BackendError> {
        let matching: Vec<HotelDto> = self
            .inventory
            .hotels
            .iter()
            .filter(|h| same_place(h.city.as_deref(), &criteria.city))
            .cloned()
            .collect();
        Ok(convert_all(matching, convert_hotel))
    }

    /// Mimics `BookingApiClient::get_bus`.
    pub async fn get_bus(&self, id: &str) -> Result<Offer, BackendError> {
        let dto = self
            .inventory
            .buses
            .iter()
            .find(|b| b.id.as_ref().is_some_and(|w| w.to_string() == id))
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("/v1/buses/{id}")))?;
        convert_bus(dto).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: None,
        })
    }

    /// Mimics `BookingApiClient::get_flight`.
    pub async fn get_flight(&self, id: &str) -> Result<Offer, BackendError> {
        let dto = self
            .inventory
            .flights
            .iter()
            .find(|f| f.id.as_ref().is_some_and(|w| w.to_string() == id))
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("/v1/flights/{id}")))?;
        convert_flight(dto).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: None,
        })
    }
}

fn same_place(record: Option<&str>, wanted: &str) -> bool {
    record.is_some_and(|r| r.trim().eq_ignore_ascii_case(wanted.trim()))
}

/// Read and parse a JSON file, or `None` if it does not exist.
fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, BackendError> {
    if !path.is_file() {
        return Ok(None);
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        BackendError::NotConfigured(format!("failed to read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| BackendError::Json {
            message: format!("failed to parse {}: {e}", path.display()),
            body: None,
        })
}
