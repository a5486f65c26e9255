//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::backend::{BackendError, HotelCriteria, SearchCriteria};
use crate::domain::{DepartureSlot, OfferClass};
use crate::session::{SearchSession, SessionError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/buses/search", get(search_buses))
        .route("/api/buses/:id", get(get_bus))
        .route("/api/flights/search", get(search_flights))
        .route("/api/flights/:id", get(get_flight))
        .route("/api/hotels/search", get(search_hotels))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search buses, then filter and sort them.
async fn search_buses(
    State(state): State<AppState>,
    Query(req): Query<BusSearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let date = parse_date(&req.date)?;
    let criteria = SearchCriteria::bus(req.origin.trim(), req.destination.trim(), date);
    let response = run_search(&state, criteria, &req.filters()).await?;
    Ok(Json(response))
}

/// Search flights, then filter and sort them.
async fn search_flights(
    State(state): State<AppState>,
    Query(req): Query<FlightSearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let date = parse_date(&req.date)?;
    let criteria = SearchCriteria::flight(req.from.trim(), req.to.trim(), date);
    let response = run_search(&state, criteria, &req.filters()).await?;
    Ok(Json(response))
}

/// Search hotels. Results are returned in backend order, unfiltered.
async fn search_hotels(
    State(state): State<AppState>,
    Query(req): Query<HotelSearchRequest>,
) -> Result<Json<HotelSearchResponse>, AppError> {
    let city = req.city.trim();
    if city.is_empty() {
        return Err(AppError::BadRequest {
            message: "city is required".to_string(),
        });
    }

    let mut criteria = HotelCriteria::new(city);
    if let Some(guests) = req.guests {
        if guests == 0 {
            return Err(AppError::BadRequest {
                message: "guests must be at least 1".to_string(),
            });
        }
        criteria = criteria.with_guests(guests);
    }

    let hotels: Vec<HotelResult> = state
        .backend
        .search_hotels(&criteria)
        .await?
        .into_iter()
        .map(HotelResult::from)
        .collect();

    Ok(Json(HotelSearchResponse {
        count: hotels.len(),
        hotels,
    }))
}

/// Look up one bus.
async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferResult>, AppError> {
    let offer = state.backend.get_bus(&id).await?;
    Ok(Json(OfferResult::from_offer(&offer)))
}

/// Look up one flight.
async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferResult>, AppError> {
    let offer = state.backend.get_flight(&id).await?;
    Ok(Json(OfferResult::from_offer(&offer)))
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("Invalid date (expected YYYY-MM-DD): {s}"),
    })
}

/// Run one search through a fresh session and render its view.
async fn run_search(
    state: &AppState,
    criteria: SearchCriteria,
    filters: &FilterParams,
) -> Result<SearchResponse, AppError> {
    let mut session = SearchSession::new(state.config_for(criteria.kind()).clone());
    apply_filters(&mut session, filters)?;

    let (origin, destination) = criteria.route();
    info!(kind = %criteria.kind(), origin, destination, "search request");

    session.search(state.backend.as_ref(), criteria).await?;

    Ok(SearchResponse::from_view(
        &session.view(),
        session.results().len(),
        session.active_filter_count(),
        session.sort_key().as_str(),
    ))
}

/// Apply request filters to a session.
///
/// Selections are additive: a value already selected is left selected.
fn apply_filters(session: &mut SearchSession, filters: &FilterParams) -> Result<(), SessionError> {
    for class in &filters.classes {
        if !session.spec().classes.contains(&OfferClass::new(class.as_str())) {
            session.toggle("busType", class)?;
        }
    }

    for slot in &filters.slots {
        let slot: DepartureSlot = slot.parse()?;
        if !session.spec().slots.contains(&slot) {
            session.toggle_slot(slot);
        }
    }

    if filters.min_price.is_some() || filters.max_price.is_some() {
        let defaults = session.config().default_price_range;
        session.set_price_range(
            filters.min_price.unwrap_or(defaults.min()),
            filters.max_price.unwrap_or(defaults.max()),
        )?;
    }

    if let Some(rating) = filters.min_rating {
        session.set_minimum_rating(rating)?;
    }

    if let Some(sort) = &filters.sort {
        session.set_sort_key_str(sort)?;
    }

    Ok(())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidArgument(message) => AppError::BadRequest { message },
            SessionError::FetchFailure(e) => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
