//! Book (catalog title) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        copy::CopyListing,
        import_report::ImportReport,
    },
    AppState,
};

use super::created_or_existing;

/// Search books by title or author
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books ordered by title", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&query).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 200, description = "Identical book already cataloged", body = Book),
        (status = 400, description = "Missing title")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let (book, created) = state.services.catalog.create_book(book).await?;
    Ok((created_or_existing(created), Json(book)))
}

/// Import a batch of book rows
#[utoipa::path(
    post,
    path = "/books/import",
    tag = "books",
    request_body = Vec<CreateBook>,
    responses(
        (status = 200, description = "Import summary", body = ImportReport)
    )
)]
pub async fn import_books(
    State(state): State<AppState>,
    Json(rows): Json<Vec<CreateBook>>,
) -> AppResult<Json<ImportReport>> {
    let report = state.services.catalog.import_books(rows).await?;
    Ok(Json(report))
}

/// Update a book that has no copies yet
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has copies or duplicates another book")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update_book(id, changes).await?;
    Ok(Json(book))
}

/// List the copies of a book with their loan status
#[utoipa::path(
    get,
    path = "/books/{id}/copies",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Copies of the book", body = Vec<CopyListing>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_copies(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CopyListing>>> {
    let copies = state.services.catalog.copies_for_book(id).await?;
    Ok(Json(copies))
}
