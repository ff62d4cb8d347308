//! Rutas geo (proxy del proveedor HERE)
//!
//! Se consumen server-to-server con el secreto interno; la API key del
//! proveedor nunca sale de este servicio.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::dto::geo_dto::{
    AutocompleteQuery, CitySuggestion, Coordinates, DistanceQuery, DistanceResponse, GeocodeQuery,
};
use crate::middleware::internal::internal_secret_middleware;
use crate::services::geo_service::GeoService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_geo_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/autocomplete", get(autocomplete))
        .route("/geocode", get(geocode))
        .route("/distance", get(distance))
        .route_layer(middleware::from_fn_with_state(
            state,
            internal_secret_middleware,
        ))
}

fn geo_service(state: &AppState) -> Result<Arc<GeoService>, AppError> {
    state.geo.clone().ok_or_else(|| {
        AppError::ExternalApi("Geo provider is not configured".to_string())
    })
}

async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<Vec<CitySuggestion>>, AppError> {
    if query.q.trim().len() < 2 {
        return Ok(Json(Vec::new()));
    }

    let geo = geo_service(&state)?;
    let suggestions = geo
        .autocomplete(&query.q)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Autocomplete failed: {}", e)))?;

    Ok(Json(suggestions))
}

async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<Coordinates>, AppError> {
    let geo = geo_service(&state)?;
    let coords = geo
        .geocode(&query.city)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Geocode failed: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("No coordinates for '{}'", query.city)))?;

    Ok(Json(coords))
}

async fn distance(
    State(state): State<AppState>,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<DistanceResponse>, AppError> {
    let geo = geo_service(&state)?;
    let result = geo
        .distance(&query.origin, &query.destination)
        .await
        .map_err(|e| AppError::ExternalApi(format!("Distance lookup failed: {}", e)))?;

    Ok(Json(result))
}
