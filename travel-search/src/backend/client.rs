//! Booking backend HTTP client.
//!
//! Provides async methods for querying the booking backend's search and
//! lookup endpoints. Handles bearer authentication, a concurrency limit, and
//! conversion to domain types.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::domain::{HotelOffer, Offer};

use super::convert::{convert_all, convert_bus, convert_flight, convert_hotel};
use super::criteria::{HotelCriteria, SearchCriteria};
use super::error::BackendError;
use super::types::{BusDto, FlightDto, HotelDto};

/// Default base URL for the booking backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparseable body to keep for diagnostics.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the booking client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, including the `/api` prefix.
    pub base_url: String,
    /// JWT sent as `Authorization: Bearer ...`, if logged in.
    pub auth_token: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create a new config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Authenticate requests with a bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Booking backend API client.
///
/// Cheap to clone; clones share the connection pool and the concurrency
/// limit.
#[derive(Debug, Clone)]
pub struct BookingApiClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl BookingApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                BackendError::NotConfigured("auth token contains invalid characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Search for bus or flight offers.
    ///
    /// Records the backend sends that fail validation are dropped; the rest
    /// are returned in backend order.
    pub async fn search_offers(&self, criteria: &SearchCriteria) -> Result<Vec<Offer>, BackendError> {
        let (origin, destination) = criteria.route();
        info!(kind = %criteria.kind(), origin, destination, "searching offers");

        let offers = match criteria {
            SearchCriteria::Bus { .. } => {
                let dtos: Vec<BusDto> = self.get_json(criteria.path(), &criteria.query()).await?;
                convert_all(dtos, convert_bus)
            }
            SearchCriteria::Flight { .. } => {
                let dtos: Vec<FlightDto> =
                    self.get_json(criteria.path(), &criteria.query()).await?;
                convert_all(dtos, convert_flight)
            }
        };

        debug!(count = offers.len(), "search returned offers");
        Ok(offers)
    }

    /// Search for hotel rooms.
    pub async fn search_hotels(
        &self,
        criteria: &HotelCriteria,
    ) -> Result<Vec<HotelOffer>, BackendError> {
        info!(city = %criteria.city, guests = criteria.guests, "searching hotels");
        let dtos: Vec<HotelDto> = self.get_json("/v1/hotels/search", &criteria.query()).await?;
        Ok(convert_all(dtos, convert_hotel))
    }

    /// Fetch a single bus by id.
    pub async fn get_bus(&self, id: &str) -> Result<Offer, BackendError> {
        let dto: BusDto = self.get_json(&format!("/v1/buses/{id}"), &[]).await?;
        convert_bus(dto).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: None,
        })
    }

    /// Fetch a single flight by id.
    pub async fn get_flight(&self, id: &str) -> Result<Offer, BackendError> {
        let dto: FlightDto = self.get_json(&format!("/v1/flights/{id}"), &[]).await?;
        convert_flight(dto).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: None,
        })
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, BackendError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| BackendError::NotConfigured("request limiter closed".to_string()))?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
        })
    }
}
