//! Search session errors.

use crate::backend::BackendError;
use crate::domain::{InvalidPriceRange, InvalidRating, InvalidSlot};
use crate::pipeline::InvalidSortKey;

/// Error from a session operation.
///
/// A failed operation never changes the session's state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A filter or sort argument was rejected
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend search failed
    #[error("fetch failed: {0}")]
    FetchFailure(#[from] BackendError),
}

impl From<InvalidPriceRange> for SessionError {
    fn from(e: InvalidPriceRange) -> Self {
        SessionError::InvalidArgument(e.to_string())
    }
}

impl From<InvalidRating> for SessionError {
    fn from(e: InvalidRating) -> Self {
        SessionError::InvalidArgument(e.to_string())
    }
}

impl From<InvalidSlot> for SessionError {
    fn from(e: InvalidSlot) -> Self {
        SessionError::InvalidArgument(e.to_string())
    }
}

impl From<InvalidSortKey> for SessionError {
    fn from(e: InvalidSortKey) -> Self {
        SessionError::InvalidArgument(e.to_string())
    }
}
