// HTTP request handlers
use crate::application::selection_service::{SelectionPhase, SelectionState};
use crate::domain::cases_by_time::{CasesByTimeFeature, SeriesSummary};
use crate::domain::latest::LatestSnapshot;
use crate::domain::selection::{CountyFeature, SelectionLocation, Selector, StateFeature};
use crate::domain::trend::{LayerFeature, TrendData};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TrendQuery {
    pub trend: Option<String>,
}

impl TrendQuery {
    fn trend(&self) -> Result<TrendData, ApiError> {
        match self.trend.as_deref() {
            None | Some("") => Ok(TrendData::default()),
            Some(s) => s.parse().map_err(ApiError::Validation),
        }
    }
}

#[derive(Deserialize)]
pub struct SeriesQuery {
    #[serde(rename = "countyFIPS")]
    pub county_fips: Option<String>,
    #[serde(rename = "stateName")]
    pub state_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: Option<String>,
    pub dt: i64,
    pub confirmed: i64,
    pub deaths: i64,
    pub new_cases: i64,
    pub new_deaths: i64,
    pub population: i64,
}

impl From<&CasesByTimeFeature> for SeriesPoint {
    fn from(feature: &CasesByTimeFeature) -> Self {
        Self {
            date: feature.date().map(|d| d.to_string()),
            dt: feature.date_ms,
            confirmed: feature.confirmed,
            deaths: feature.deaths,
            new_cases: feature.new_cases,
            new_deaths: feature.new_deaths,
            population: feature.population,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub date: Option<String>,
    pub confirmed: i64,
    pub deaths: i64,
    pub new_cases: i64,
    pub new_deaths: i64,
    pub population: i64,
}

impl From<SeriesSummary> for SummaryResponse {
    fn from(summary: SeriesSummary) -> Self {
        Self {
            date: summary.date.map(|d| d.to_string()),
            confirmed: summary.confirmed,
            deaths: summary.deaths,
            new_cases: summary.new_cases,
            new_deaths: summary.new_deaths,
            population: summary.population,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub selector: String,
    pub summary: Option<SummaryResponse>,
    pub series: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub generation: u64,
    pub phase: SelectionPhase,
    pub loading: bool,
    pub location: Option<SelectionLocation>,
    pub summary: Option<SummaryResponse>,
    pub series: Option<Vec<SeriesPoint>>,
}

impl From<SelectionState> for SelectionResponse {
    fn from(state: SelectionState) -> Self {
        let summary = state
            .series
            .as_deref()
            .and_then(|s| SeriesSummary::from_features(s))
            .map(SummaryResponse::from);

        Self {
            generation: state.generation,
            phase: state.phase,
            loading: state.loading,
            location: state.location,
            summary,
            series: state
                .series
                .map(|s| s.iter().map(SeriesPoint::from).collect()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// County layer, one trend line per FIPS
pub async fn county_trends(
    Query(query): Query<TrendQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LayerFeature>>, ApiError> {
    let trend = query.trend()?;
    state
        .trend_data_service
        .county_layer(trend)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::ServiceUnavailable("trend data not loaded".to_string()))
}

/// State layer, one trend line per state
pub async fn state_trends(
    Query(query): Query<TrendQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LayerFeature>>, ApiError> {
    let trend = query.trend()?;
    state
        .trend_data_service
        .state_layer(trend)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::ServiceUnavailable("trend data not loaded".to_string()))
}

/// Reload the hosted datasets
pub async fn refresh_trends(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    match state.trend_data_service.try_load().await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            tracing::error!("Trend data refresh failed: {:#}", e);
            Err(ApiError::ServiceUnavailable(
                "trend data refresh failed".to_string(),
            ))
        }
    }
}

/// Tooltip numbers for a region
pub async fn latest_numbers(
    Path(fips): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LatestSnapshot>, ApiError> {
    state
        .trend_data_service
        .tooltip(&fips)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no latest numbers for {}", fips)))
}

/// Time series for exactly one of `countyFIPS` or `stateName`
pub async fn trend_series(
    Query(query): Query<SeriesQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeriesResponse>, ApiError> {
    let selector =
        Selector::from_parts(query.county_fips.as_deref(), query.state_name.as_deref())?;

    let series = state
        .time_series_service
        .fetch_trend_series(&selector)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("no time series for {}", selector)))?;

    Ok(Json(SeriesResponse {
        selector: selector.to_string(),
        summary: SeriesSummary::from_features(&series).map(SummaryResponse::from),
        series: series.iter().map(SeriesPoint::from).collect(),
    }))
}

pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<SelectionResponse> {
    Json(state.selection_service.current().await.into())
}

/// Select a county from its layer attributes
pub async fn select_county(
    State(state): State<Arc<AppState>>,
    Json(attributes): Json<Map<String, Value>>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let county = CountyFeature::from_attributes(&attributes)?;
    let selection = state.selection_service.select(&county).await;
    Ok(Json(selection.into()))
}

/// Select a state from its layer attributes
pub async fn select_state(
    State(state): State<Arc<AppState>>,
    Json(attributes): Json<Map<String, Value>>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let feature = StateFeature::from_attributes(&attributes)?;
    let selection = state.selection_service.select(&feature).await;
    Ok(Json(selection.into()))
}

pub async fn deselect(State(state): State<Arc<AppState>>) -> Json<SelectionResponse> {
    Json(state.selection_service.deselect().await.into())
}
