//! Business logic services

pub mod catalog;
pub mod export;
pub mod lending;
pub mod locations;
pub mod members;
pub mod reports;

use crate::{config::LibraryConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub export: export::ExportService,
    pub members: members::MembersService,
    pub locations: locations::LocationsService,
    pub lending: lending::LendingService,
    pub reports: reports::ReportsService,
    pub repository: Repository,
}

impl Services {
    /// Create all services over one shared repository
    pub fn new(repository: Repository, library: LibraryConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), library.clone()),
            export: export::ExportService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            locations: locations::LocationsService::new(repository.clone()),
            lending: lending::LendingService::new(repository.clone(), library),
            reports: reports::ReportsService::new(repository.clone()),
            repository,
        }
    }
}

/// Calendar date used for defaults and the overdue predicate
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
