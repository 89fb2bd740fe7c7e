//! Shelf location endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::location::{CreateLocation, Location, UpdateLocation},
    AppState,
};

use super::created_or_existing;

/// List shelf locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    responses(
        (status = 200, description = "All locations", body = Vec<Location>)
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.locations.list().await?;
    Ok(Json(locations))
}

/// Add a shelf location
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 200, description = "Code already exists", body = Location),
        (status = 400, description = "Missing code")
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    Json(location): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let (location, created) = state.services.locations.create(location).await?;
    Ok((created_or_existing(created), Json(location)))
}

/// Change a location's description
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    params(
        ("id" = i64, Path, description = "Location ID")
    ),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.update(id, changes).await?;
    Ok(Json(location))
}
