//! Search sessions.
//!
//! A session owns one fetched result set and the user's current filter and
//! sort selection, and keeps a derived view of the two up to date.

mod category;
mod error;
mod provider;
mod state;

pub use category::FilterCategory;
pub use error::SessionError;
pub use provider::OfferProvider;
pub use state::{SearchOutcome, SearchSession, SearchTicket, View};
