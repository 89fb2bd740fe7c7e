//! Reporting endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::report::{Dashboard, GenreCount, OverdueEntry},
    AppState,
};

/// Headline counts
#[utoipa::path(
    get,
    path = "/reports/dashboard",
    tag = "reports",
    responses(
        (status = 200, description = "Titles, copies, open and overdue loans", body = Dashboard)
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<Dashboard>> {
    let dashboard = state.services.reports.dashboard().await?;
    Ok(Json(dashboard))
}

/// Titles grouped by genre
#[utoipa::path(
    get,
    path = "/reports/genres",
    tag = "reports",
    responses(
        (status = 200, description = "Title count per genre", body = Vec<GenreCount>)
    )
)]
pub async fn get_titles_by_genre(State(state): State<AppState>) -> AppResult<Json<Vec<GenreCount>>> {
    let genres = state.services.reports.titles_by_genre().await?;
    Ok(Json(genres))
}

/// Open loans past their due date, earliest first
#[utoipa::path(
    get,
    path = "/reports/overdue",
    tag = "reports",
    responses(
        (status = 200, description = "Overdue loans", body = Vec<OverdueEntry>)
    )
)]
pub async fn get_overdue(State(state): State<AppState>) -> AppResult<Json<Vec<OverdueEntry>>> {
    let overdue = state.services.reports.overdue().await?;
    Ok(Json(overdue))
}
