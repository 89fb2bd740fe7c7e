//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    books, copies, export, health, locations, members, reports, settings, transactions,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "KEN Library API",
        version = "0.1.0",
        description = "Catalog, copies, members and lending ledger",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::import_books,
        books::update_book,
        books::list_book_copies,
        // Copies
        copies::list_copies,
        copies::get_copy,
        copies::create_copy,
        copies::update_copy,
        copies::get_copy_status,
        copies::get_status_by_accession,
        copies::get_copy_label,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::get_member_loans,
        // Locations
        locations::list_locations,
        locations::create_location,
        locations::update_location,
        // Lending
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::issue_copy,
        transactions::return_copy,
        // Reports
        reports::get_dashboard,
        reports::get_titles_by_genre,
        reports::get_overdue,
        // Export
        export::export_snapshot,
        export::export_books,
        export::export_copies,
        export::export_members,
        export::export_transactions,
        export::export_locations,
        // Settings
        settings::get_library_settings,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::import_report::ImportReport,
            // Copies
            crate::models::copy::BookCopy,
            crate::models::copy::CopyCondition,
            crate::models::copy::CopyListing,
            crate::models::copy::CreateCopy,
            crate::models::copy::UpdateCopy,
            crate::models::copy::CopyLabel,
            // Members
            crate::models::member::Member,
            crate::models::member::MemberShort,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            // Locations
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            // Lending
            crate::models::transaction::Transaction,
            crate::models::transaction::TransactionDetails,
            crate::models::transaction::Availability,
            crate::models::transaction::CopyStatus,
            crate::models::transaction::IssueCopy,
            crate::models::transaction::ReturnCopy,
            // Reports
            crate::models::report::Dashboard,
            crate::models::report::GenreCount,
            crate::models::report::OverdueEntry,
            // Export
            crate::models::export::LibrarySnapshot,
            // Settings
            crate::config::LibraryConfig,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog titles"),
        (name = "copies", description = "Physical copies and their loan status"),
        (name = "members", description = "Borrowers"),
        (name = "locations", description = "Shelf locations"),
        (name = "lending", description = "Issue and return"),
        (name = "reports", description = "Dashboards and overdue list"),
        (name = "export", description = "Unpaged snapshots of every table"),
        (name = "settings", description = "Server defaults")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
