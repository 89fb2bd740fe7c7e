//! Copy (physical item) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        copy::{BookCopy, CopyLabel, CopyListing, CopyQuery, CreateCopy, UpdateCopy},
        transaction::CopyStatus,
    },
    AppState,
};

use super::created_or_existing;

/// List copies with title, availability and holder
#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    params(CopyQuery),
    responses(
        (status = 200, description = "Copies with derived status", body = Vec<CopyListing>)
    )
)]
pub async fn list_copies(
    State(state): State<AppState>,
    Query(query): Query<CopyQuery>,
) -> AppResult<Json<Vec<CopyListing>>> {
    let copies = state.services.catalog.list_copies(&query).await?;
    Ok(Json(copies))
}

/// Get copy by ID
#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    params(
        ("id" = i64, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Copy details", body = BookCopy),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookCopy>> {
    let copy = state.services.catalog.get_copy(id).await?;
    Ok(Json(copy))
}

/// Add a physical copy of a book
#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    request_body = CreateCopy,
    responses(
        (status = 201, description = "Copy created", body = BookCopy),
        (status = 200, description = "Accession number already registered", body = BookCopy),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_copy(
    State(state): State<AppState>,
    Json(copy): Json<CreateCopy>,
) -> AppResult<(StatusCode, Json<BookCopy>)> {
    let (copy, created) = state.services.catalog.create_copy(copy).await?;
    Ok((created_or_existing(created), Json(copy)))
}

/// Update condition, location, price or accession number
#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "copies",
    params(
        ("id" = i64, Path, description = "Copy ID")
    ),
    request_body = UpdateCopy,
    responses(
        (status = 200, description = "Copy updated", body = BookCopy),
        (status = 404, description = "Copy not found"),
        (status = 409, description = "Accession number already in use")
    )
)]
pub async fn update_copy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<UpdateCopy>,
) -> AppResult<Json<BookCopy>> {
    let copy = state.services.catalog.update_copy(id, changes).await?;
    Ok(Json(copy))
}

/// Whether a copy is on loan, and to whom
#[utoipa::path(
    get,
    path = "/copies/{id}/status",
    tag = "copies",
    params(
        ("id" = i64, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Availability and holder", body = CopyStatus),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CopyStatus>> {
    let status = state.services.lending.copy_status(id).await?;
    Ok(Json(status))
}

/// Availability by accession number
#[utoipa::path(
    get,
    path = "/accessions/{accession_no}/status",
    tag = "copies",
    params(
        ("accession_no" = String, Path, description = "Accession number")
    ),
    responses(
        (status = 200, description = "Availability and holder", body = CopyStatus),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_status_by_accession(
    State(state): State<AppState>,
    Path(accession_no): Path<String>,
) -> AppResult<Json<CopyStatus>> {
    let status = state
        .services
        .lending
        .copy_status_by_accession(&accession_no)
        .await?;
    Ok(Json(status))
}

/// Label payload for a copy
#[utoipa::path(
    get,
    path = "/copies/{id}/label",
    tag = "copies",
    params(
        ("id" = i64, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Pipe-delimited label text", body = CopyLabel),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy_label(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CopyLabel>> {
    let label = state.services.catalog.label(id).await?;
    Ok(Json(label))
}
