//! Application state for the web layer.

use std::future::Future;
use std::sync::Arc;

use crate::backend::{
    BackendError, BookingApiClient, HotelCriteria, MockBookingApi, SearchCriteria,
};
use crate::domain::{HotelOffer, Offer, OfferKind};
use crate::pipeline::FilterConfig;
use crate::session::OfferProvider;

/// Where offers come from.
#[derive(Debug, Clone)]
pub enum Backend {
    /// The booking REST API
    Live(BookingApiClient),
    /// Inventory loaded from local JSON files
    Mock(MockBookingApi),
}

impl Backend {
    pub async fn search_hotels(
        &self,
        criteria: &HotelCriteria,
    ) -> Result<Vec<HotelOffer>, BackendError> {
        match self {
            Backend::Live(client) => client.search_hotels(criteria).await,
            Backend::Mock(mock) => mock.search_hotels(criteria).await,
        }
    }

    pub async fn get_bus(&self, id: &str) -> Result<Offer, BackendError> {
        match self {
            Backend::Live(client) => client.get_bus(id).await,
            Backend::Mock(mock) => mock.get_bus(id).await,
        }
    }

    pub async fn get_flight(&self, id: &str) -> Result<Offer, BackendError> {
        match self {
            Backend::Live(client) => client.get_flight(id).await,
            Backend::Mock(mock) => mock.get_flight(id).await,
        }
    }
}

impl OfferProvider for Backend {
    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<Offer>, BackendError>> + Send {
        async move {
            match self {
                Backend::Live(client) => client.search_offers(criteria).await,
                Backend::Mock(mock) => mock.search_offers(criteria).await,
            }
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Offer backend
    pub backend: Arc<Backend>,

    /// Filter defaults for bus sessions
    pub bus_config: Arc<FilterConfig>,

    /// Filter defaults for flight sessions
    pub flight_config: Arc<FilterConfig>,
}

impl AppState {
    /// Create a new app state with each offer kind's default filters.
    pub fn new(backend: Backend) -> Self {
        Self::with_configs(
            backend,
            FilterConfig::for_kind(OfferKind::Bus),
            FilterConfig::for_kind(OfferKind::Flight),
        )
    }

    /// Create a new app state with explicit filter defaults.
    pub fn with_configs(
        backend: Backend,
        bus_config: FilterConfig,
        flight_config: FilterConfig,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            bus_config: Arc::new(bus_config),
            flight_config: Arc::new(flight_config),
        }
    }

    /// Filter defaults for sessions searching `kind`.
    pub fn config_for(&self, kind: OfferKind) -> &FilterConfig {
        match kind {
            OfferKind::Bus => &self.bus_config,
            OfferKind::Flight => &self.flight_config,
        }
    }
}
