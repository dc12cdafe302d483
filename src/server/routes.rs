use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State as AxumState},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::debug;

use crate::models::api::{iso_timestamp, Envelope, ServerInfo, ServerStatus};
use crate::models::GeoPoint;
use crate::sources::types::DEFAULT_RADIUS_KM;
use crate::sources::SearchArea;

use super::error::{AppError, NOT_FOUND};
use super::state::State;

pub const SERVER_NAME: &str = "Nearby Offers Mini App Server";

/// `GET /api/offers?lat=..&lon=..&radius=..`
pub async fn offers_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let area = parse_search_area(&params)?;
    debug!("Offer query: {area:?}");

    let payload = state.offers.find_offers(area).await?;

    Ok(Json(Envelope::ok(payload).with_timestamp(Utc::now())))
}

/// `GET /api/info`
pub async fn info_handler(AxumState(state): AxumState<Arc<State>>) -> impl IntoResponse {
    Json(Envelope::ok(ServerInfo {
        name: SERVER_NAME.to_string(),
        port: state.config.port,
        env: state.config.env.clone(),
        uptime: state.uptime(),
        timestamp: iso_timestamp(Utc::now()),
    }))
}

/// `GET /api/status`
pub async fn status_handler(AxumState(state): AxumState<Arc<State>>) -> impl IntoResponse {
    Json(Envelope::ok(ServerStatus {
        status: "online".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.uptime(),
        timestamp: iso_timestamp(Utc::now()),
    }))
}

/// Fallback for every unmatched route
pub async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let body: Envelope<()> = Envelope::failure(NOT_FOUND).with_path(path);
    (StatusCode::NOT_FOUND, Json(body))
}

/// Validate raw query parameters into a search area
///
/// Empty values count as missing. Radius falls back to the default when absent.
pub fn parse_search_area(params: &HashMap<String, String>) -> Result<SearchArea, AppError> {
    let (Some(lat), Some(lon)) = (non_empty(params, "lat"), non_empty(params, "lon")) else {
        return Err(AppError::MissingParameters);
    };

    let lat = parse_finite(lat, "lat")?;
    let lon = parse_finite(lon, "lon")?;

    let radius = match non_empty(params, "radius") {
        Some(raw) => parse_finite(raw, "radius")?,
        None => DEFAULT_RADIUS_KM,
    };
    if radius < 0.0 {
        return Err(AppError::InvalidParameter("radius"));
    }

    Ok(SearchArea::new(GeoPoint::new(lat, lon), radius))
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_finite(raw: &str, name: &'static str) -> Result<f64, AppError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(AppError::InvalidParameter(name))
}
