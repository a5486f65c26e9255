//! Source of offers for a search session.

use std::future::Future;

use crate::backend::{BackendError, BookingApiClient, MockBookingApi, SearchCriteria};
use crate::domain::Offer;

/// Trait for fetching the offers matching a search.
///
/// This abstraction allows the session to be driven by the live backend,
/// the mock backend, or a scripted provider in tests.
pub trait OfferProvider {
    /// Fetch every offer matching `criteria`, in backend order.
    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<Offer>, BackendError>> + Send;
}

impl OfferProvider for BookingApiClient {
    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<Offer>, BackendError>> + Send {
        self.search_offers(criteria)
    }
}

impl OfferProvider for MockBookingApi {
    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<Offer>, BackendError>> + Send {
        self.search_offers(criteria)
    }
}
