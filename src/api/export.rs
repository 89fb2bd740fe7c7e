//! Unpaged export endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        book::Book, copy::BookCopy, export::LibrarySnapshot, location::Location, member::Member,
        transaction::Transaction,
    },
    AppState,
};

/// Every table in one document
#[utoipa::path(
    get,
    path = "/export",
    tag = "export",
    responses(
        (status = 200, description = "Full snapshot", body = LibrarySnapshot)
    )
)]
pub async fn export_snapshot(State(state): State<AppState>) -> AppResult<Json<LibrarySnapshot>> {
    let snapshot = state.services.export.snapshot().await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/export/books",
    tag = "export",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn export_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.services.export.books().await?))
}

#[utoipa::path(
    get,
    path = "/export/copies",
    tag = "export",
    responses(
        (status = 200, description = "All copies with every stored column", body = Vec<BookCopy>)
    )
)]
pub async fn export_copies(State(state): State<AppState>) -> AppResult<Json<Vec<BookCopy>>> {
    Ok(Json(state.services.export.copies().await?))
}

#[utoipa::path(
    get,
    path = "/export/members",
    tag = "export",
    responses(
        (status = 200, description = "All members", body = Vec<Member>)
    )
)]
pub async fn export_members(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    Ok(Json(state.services.export.members().await?))
}

#[utoipa::path(
    get,
    path = "/export/transactions",
    tag = "export",
    responses(
        (status = 200, description = "The whole ledger, oldest first", body = Vec<Transaction>)
    )
)]
pub async fn export_transactions(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    Ok(Json(state.services.export.transactions().await?))
}

#[utoipa::path(
    get,
    path = "/export/locations",
    tag = "export",
    responses(
        (status = 200, description = "All shelf locations", body = Vec<Location>)
    )
)]
pub async fn export_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    Ok(Json(state.services.export.locations().await?))
}
