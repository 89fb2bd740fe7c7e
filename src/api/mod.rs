//! API handlers for the KEN library REST endpoints

pub mod books;
pub mod copies;
pub mod export;
pub mod health;
pub mod locations;
pub mod members;
pub mod openapi;
pub mod reports;
pub mod settings;
pub mod transactions;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// 201 for a new row, 200 when an identical one already existed
pub(crate) fn created_or_existing(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/import", post(books::import_books))
        .route("/books/:id", get(books::get_book).put(books::update_book))
        .route("/books/:id/copies", get(books::list_book_copies))
        // Copies
        .route("/copies", get(copies::list_copies).post(copies::create_copy))
        .route("/copies/:id", get(copies::get_copy).put(copies::update_copy))
        .route("/copies/:id/status", get(copies::get_copy_status))
        .route("/copies/:id/label", get(copies::get_copy_label))
        .route("/accessions/:accession_no/status", get(copies::get_status_by_accession))
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route("/members/:id", get(members::get_member).put(members::update_member))
        .route("/members/:id/transactions", get(members::get_member_loans))
        // Locations
        .route("/locations", get(locations::list_locations).post(locations::create_location))
        .route("/locations/:id", put(locations::update_location))
        // Lending
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::issue_copy),
        )
        .route("/transactions/:id", get(transactions::get_transaction))
        .route("/transactions/:id/return", post(transactions::return_copy))
        // Reports
        .route("/reports/dashboard", get(reports::get_dashboard))
        .route("/reports/genres", get(reports::get_titles_by_genre))
        .route("/reports/overdue", get(reports::get_overdue))
        // Export
        .route("/export", get(export::export_snapshot))
        .route("/export/books", get(export::export_books))
        .route("/export/copies", get(export::export_copies))
        .route("/export/members", get(export::export_members))
        .route("/export/transactions", get(export::export_transactions))
        .route("/export/locations", get(export::export_locations))
        // Settings
        .route("/settings", get(settings::get_library_settings))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
