//! Domain types for travel search.
//!
//! This module contains the core domain model types that represent
//! validated offer data and filter bounds. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod bounds;
mod offer;
mod slot;
mod time;

pub use bounds::{
    DEFAULT_MAX_PRICE, InvalidPriceRange, InvalidRating, MAX_RATING, MinRating, PriceRange,
};
pub use offer::{
    DEFAULT_DURATION_MINUTES, DEFAULT_RATING, HotelOffer, Offer, OfferClass, OfferKind,
};
pub use slot::{DepartureSlot, InvalidSlot};
pub use time::{ClockTime, OfferTime, TimeError};
