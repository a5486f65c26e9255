//! Booking backend client.
//!
//! This module talks to the booking REST API that holds bus, flight and
//! hotel inventory, and converts its records into domain offers.
//!
//! Key characteristics of the backend:
//! - Bus searches take the date as `YYYY-MM-DDT00:00:00`, flight searches
//!   as `YYYY-MM-DD`
//! - Departure times are either "HH:MM" or an ISO 8601 datetime, depending
//!   on where the record came from
//! - Ratings and durations are often missing; the domain layer supplies
//!   fallbacks

mod client;
mod convert;
mod criteria;
mod error;
mod mock;
mod types;

pub use client::{BackendConfig, BookingApiClient, DEFAULT_BASE_URL};
pub use convert::{
    ConversionError, DEFAULT_FLIGHT_CLASS, convert_all, convert_bus, convert_flight, convert_hotel,
    parse_duration_label,
};
pub use criteria::{DEFAULT_GUESTS, HotelCriteria, SearchCriteria};
pub use error::BackendError;
pub use mock::MockBookingApi;
pub use types::{BusDto, FlightDto, HotelDto, WireId};
