use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use travel_search::backend::{BackendConfig, BookingApiClient, DEFAULT_BASE_URL, MockBookingApi};
use travel_search::web::{AppState, Backend, create_router};

/// Address to listen on when `TRAVEL_LISTEN_ADDR` is unset.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Mock data takes precedence over the live API
    let backend = match std::env::var("TRAVEL_MOCK_DATA") {
        Ok(dir) => {
            info!(%dir, "using mock backend");
            Backend::Mock(MockBookingApi::new(&dir)?)
        }
        Err(_) => {
            let base_url = std::env::var("TRAVEL_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            let mut config = BackendConfig::new(&base_url);
            match std::env::var("TRAVEL_API_TOKEN") {
                Ok(token) => config = config.with_auth_token(token),
                Err(_) => warn!("TRAVEL_API_TOKEN not set; requests will be unauthenticated"),
            }
            info!(%base_url, "using booking API");
            Backend::Live(BookingApiClient::new(config)?)
        }
    };

    let state = AppState::new(backend);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("TRAVEL_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()?;

    info!("travel search listening on http://{addr}");
    info!("  GET /health");
    info!("  GET /api/buses/search?origin=&destination=&date=");
    info!("  GET /api/flights/search?from=&to=&date=");
    info!("  GET /api/hotels/search?city=&guests=");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
