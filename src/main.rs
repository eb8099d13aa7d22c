// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::query_cache::QueryCache;
use crate::application::selection_service::SelectionService;
use crate::application::time_series_service::TimeSeriesService;
use crate::application::trend_data_service::TrendDataService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::feature_service_repository::FeatureServiceRepository;
use crate::infrastructure::static_trend_repository::StaticTrendRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    county_trends, deselect, get_selection, health_check, latest_numbers, refresh_trends,
    select_county, select_state, state_trends, trend_series,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repositories (infrastructure layer)
    let trend_repository = Arc::new(StaticTrendRepository::new(config.data.clone()));
    let feature_repository = Arc::new(FeatureServiceRepository::new(
        config.feature_service.url.clone(),
        config.feature_service.timeout(),
    )?);

    // One cache per session, shared by every query
    let cache = Arc::new(QueryCache::new(config.cache.key_policy));
    tracing::info!("Query cache key policy: {:?}", cache.policy());

    // Create services (application layer)
    let trend_data_service = TrendDataService::new(trend_repository);
    let time_series_service = TimeSeriesService::new(feature_repository, cache);
    let selection_service = SelectionService::new(time_series_service.clone());

    // Datasets load in the background; layers answer 503 until they land
    let loader = trend_data_service.clone();
    tokio::spawn(async move { loader.load().await });

    // Create application state
    let state = Arc::new(AppState {
        trend_data_service,
        time_series_service,
        selection_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/trends/counties", get(county_trends))
        .route("/trends/states", get(state_trends))
        .route("/trends/refresh", post(refresh_trends))
        .route("/latest/:fips", get(latest_numbers))
        .route("/series", get(trend_series))
        .route("/selection", get(get_selection).delete(deselect))
        .route("/selection/county", post(select_county))
        .route("/selection/state", post(select_state))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_address.parse()?;
    tracing::info!("Starting covid19-trend-map service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
