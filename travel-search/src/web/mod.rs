//! Web layer for travel search.
//!
//! Provides JSON endpoints that search the booking backend and return
//! filtered, sorted results.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Backend};
