//! Shelf locations repository

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::location::{compartment_code, Location},
};

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Sqlite>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(locations)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    pub async fn get_by_code(&self, code: &str) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(location)
    }

    /// Insert a location unless its code exists.
    /// Returns the stored row and whether it was newly created.
    pub async fn insert_if_absent(
        &self,
        code: &str,
        description: Option<&str>,
    ) -> AppResult<(Location, bool)> {
        let inserted = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (code, description) VALUES (?, ?)
            ON CONFLICT (code) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(location) = inserted {
            return Ok((location, true));
        }

        let existing = self.get_by_code(code).await?.ok_or_else(|| {
            AppError::Internal(format!("Location {} was rejected but does not exist", code))
        })?;
        Ok((existing, false))
    }

    pub async fn update_description(&self, id: i64, description: Option<&str>) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            "UPDATE locations SET description = ? WHERE id = ? RETURNING *",
        )
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert `Compartment 1..=n` in one transaction, skipping codes that exist.
    /// Returns how many rows were added.
    pub async fn seed_compartments(&self, n: u32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut added = 0;

        for i in 1..=n {
            let result = sqlx::query(
                "INSERT INTO locations (code, description) VALUES (?, ?) ON CONFLICT (code) DO NOTHING",
            )
            .bind(compartment_code(i))
            .bind(format!("Shelf compartment #{}", i))
            .execute(&mut *tx)
            .await?;
            added += result.rows_affected();
        }

        tx.commit().await?;
        Ok(added)
    }
}
