use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_search_query;
use crate::api::{ApiError, AppState};
use crate::models::location::Location;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub data: String,
}

/// `GET /location?data=<search>`
///
/// Geocodes on first sight, then always answers from the store.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Location>, ApiError> {
    let search_query = validate_search_query(&query.data)?;

    let location = state
        .resource_service()
        .resolve_location(search_query)
        .await?;

    Ok(Json(location))
}
