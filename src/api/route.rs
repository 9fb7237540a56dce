use crate::{
    api::{error::ApiError, response::with_total_count},
    db::alert,
    state::AppState,
    validation::{validate_address_action, validate_limit, validate_offset},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

// POST /track query parameters
#[derive(Deserialize)]
pub struct TrackQuery {
    address: String,
    action: String,
}

// GET /alerts query parameters
#[derive(Deserialize)]
pub struct AlertsQuery {
    offset: Option<String>,
    limit: Option<String>,
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/track", post(track_address))
        .route("/watchlist", get(get_watchlist))
        .route("/alerts", get(get_alerts))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// POST /track handler
async fn track_address(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrackQuery>,
) -> Result<Response, ApiError> {
    let action = params.action.trim().to_lowercase();
    let address = params.address.trim();
    validate_address_action(address, &action)?;

    info!("Processing track request for address: {}, action: {}", address, action);

    let mut watchlist = state.watchlist.lock().await;
    if action == "add" {
        if watchlist.add(address)? {
            Ok((StatusCode::CREATED, "Address added to tracking").into_response())
        } else {
            Ok((StatusCode::OK, "Address was already being tracked").into_response())
        }
    } else if watchlist.remove(address)? {
        state.cache.invalidate(address).await;
        Ok((StatusCode::OK, "Address removed from tracking").into_response())
    } else {
        Ok((StatusCode::OK, "Address was not being tracked").into_response())
    }
}

// GET /watchlist handler
async fn get_watchlist(State(state): State<Arc<AppState>>) -> Response {
    let addresses = state.watchlist.lock().await.addresses();
    let total = addresses.len() as i64;
    with_total_count(addresses, total)
}

// GET /alerts handler
async fn get_alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AlertsQuery>,
) -> Result<Response, ApiError> {
    let offset = validate_offset(params.offset.as_deref())?;
    let limit = validate_limit(params.limit.as_deref())?;

    let (alerts, total_count) = alert::get_alerts(&state.db_pool, offset, limit).await?;

    Ok(with_total_count(alerts, total_count))
}
