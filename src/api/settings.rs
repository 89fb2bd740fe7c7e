//! Read-only view of the running configuration

use axum::{extract::State, Json};

use crate::{config::LibraryConfig, AppState};

/// Lending and catalog defaults the server applies
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Loan term, label prefix and listing limits", body = LibraryConfig)
    )
)]
pub async fn get_library_settings(State(state): State<AppState>) -> Json<LibraryConfig> {
    Json(state.config.library.clone())
}
