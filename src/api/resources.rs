//! Cached resource endpoints.
//!
//! The front end sends the location it got from `/location` back as
//! bracketed `data[...]` query keys. Keys a handler does not use are ignored.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_coordinates, validate_location_id, validate_search_query};
use crate::api::{ApiError, AppState};
use crate::models::event::Event;
use crate::models::movie::Movie;
use crate::models::weather::Weather;
use crate::models::yelp::Yelp;

#[derive(Debug, Deserialize)]
pub struct CoordinateQuery {
    #[serde(rename = "data[id]")]
    pub id: i32,
    #[serde(rename = "data[latitude]")]
    pub latitude: f64,
    #[serde(rename = "data[longitude]")]
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchTextQuery {
    #[serde(rename = "data[id]")]
    pub id: i32,
    #[serde(rename = "data[search_query]")]
    pub search_query: String,
}

/// `GET /weather?data[id]=&data[latitude]=&data[longitude]=`
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Json<Vec<Weather>>, ApiError> {
    let location_id = validate_location_id(query.id)?;
    let at = validate_coordinates(query.latitude, query.longitude)?;

    let records = state.resource_service().weather(location_id, at).await?;
    Ok(Json(records))
}

/// `GET /events?data[id]=&data[latitude]=&data[longitude]=`
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let location_id = validate_location_id(query.id)?;
    let at = validate_coordinates(query.latitude, query.longitude)?;

    let records = state.resource_service().events(location_id, at).await?;
    Ok(Json(records))
}

/// `GET /yelps?data[id]=&data[search_query]=`
pub async fn get_yelps(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchTextQuery>,
) -> Result<Json<Vec<Yelp>>, ApiError> {
    let location_id = validate_location_id(query.id)?;
    let search_query = validate_search_query(&query.search_query)?;

    let records = state
        .resource_service()
        .yelps(location_id, search_query)
        .await?;
    Ok(Json(records))
}

/// `GET /movies?data[id]=&data[search_query]=`
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchTextQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let location_id = validate_location_id(query.id)?;
    let search_query = validate_search_query(&query.search_query)?;

    let records = state
        .resource_service()
        .movies(location_id, search_query)
        .await?;
    Ok(Json(records))
}
