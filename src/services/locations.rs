//! Shelf location service and default seeding

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        clean,
        location::{CreateLocation, Location, UpdateLocation},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LocationsService {
    repository: Repository,
}

impl LocationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list().await
    }

    /// Add a location. An existing code is left as is and returned with `false`.
    pub async fn create(&self, location: CreateLocation) -> AppResult<(Location, bool)> {
        let location = CreateLocation {
            code: location.code.trim().to_string(),
            description: clean(location.description),
        };
        location.validate()?;
        self.repository
            .locations
            .insert_if_absent(&location.code, location.description.as_deref())
            .await
    }

    pub async fn update(&self, id: i64, changes: UpdateLocation) -> AppResult<Location> {
        self.repository
            .locations
            .update_description(id, clean(changes.description).as_deref())
            .await
    }

    /// Seed `Compartment 1..=count` when the store has no locations yet.
    /// Returns how many were added.
    pub async fn ensure_default_locations(&self, count: u32) -> AppResult<u64> {
        if self.repository.locations.count().await? > 0 {
            return Ok(0);
        }
        let added = self.repository.locations.seed_compartments(count).await?;
        tracing::info!(added, "Seeded default shelf locations");
        Ok(added)
    }
}
