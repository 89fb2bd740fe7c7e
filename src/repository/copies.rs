//! Copies repository for database operations

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        copy::{BookCopy, CopyCondition, CopyListing, CopyQuery, CreateCopy},
        member::MemberShort,
        transaction::Availability,
    },
};

use super::{like_pattern, page};

/// Raw `copies` row; the price is kept as text in SQLite
#[derive(Debug, FromRow)]
struct CopyRow {
    id: i64,
    accession_no: Option<String>,
    book_id: i64,
    condition: CopyCondition,
    acquired_date: Option<NaiveDate>,
    purchase_price: Option<String>,
    current_location: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CopyRow> for BookCopy {
    fn from(row: CopyRow) -> Self {
        Self {
            id: row.id,
            accession_no: row.accession_no,
            book_id: row.book_id,
            condition: row.condition,
            acquired_date: row.acquired_date,
            purchase_price: row.purchase_price.and_then(|p| p.parse::<Decimal>().ok()),
            current_location: row.current_location,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CopyListingRow {
    id: i64,
    accession_no: Option<String>,
    book_id: i64,
    title: String,
    condition: CopyCondition,
    current_location: Option<String>,
    holder_id: Option<i64>,
    holder_name: Option<String>,
}

impl From<CopyListingRow> for CopyListing {
    fn from(row: CopyListingRow) -> Self {
        let issued_to = match (row.holder_id, row.holder_name) {
            (Some(id), Some(name)) => Some(MemberShort { id, name }),
            _ => None,
        };
        Self {
            id: row.id,
            accession_no: row.accession_no,
            book_id: row.book_id,
            title: row.title,
            condition: row.condition,
            current_location: row.current_location,
            availability: if issued_to.is_some() {
                Availability::Issued
            } else {
                Availability::Available
            },
            issued_to,
        }
    }
}

/// Fields a copy update may change
#[derive(Debug, Clone)]
pub struct CopyChanges {
    pub accession_no: Option<String>,
    pub condition: CopyCondition,
    pub purchase_price: Option<Decimal>,
    pub current_location: Option<String>,
}

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Sqlite>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookCopy> {
        sqlx::query_as::<_, CopyRow>("SELECT * FROM copies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookCopy::from)
            .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))
    }

    /// Get copy by accession number
    pub async fn get_by_accession(&self, accession_no: &str) -> AppResult<BookCopy> {
        sqlx::query_as::<_, CopyRow>("SELECT * FROM copies WHERE accession_no = ?")
            .bind(accession_no)
            .fetch_optional(&self.pool)
            .await?
            .map(BookCopy::from)
            .ok_or_else(|| {
                AppError::NotFound(format!("Copy with accession number {} not found", accession_no))
            })
    }

    /// List copies with their title and derived loan status
    pub async fn list(&self, query: &CopyQuery) -> AppResult<Vec<CopyListing>> {
        let pattern = like_pattern(query.q.as_deref());
        let (limit, offset) = page(query.limit, query.offset, 200);

        let rows = sqlx::query_as::<_, CopyListingRow>(
            r#"
            SELECT c.id, c.accession_no, c.book_id, b.title, c.condition, c.current_location,
                   m.id AS holder_id, m.name AS holder_name
            FROM copies c
            JOIN books b ON b.id = c.book_id
            LEFT JOIN transactions t ON t.id = (
                SELECT MAX(t2.id) FROM transactions t2
                WHERE t2.copy_id = c.id AND t2.return_date IS NULL
            )
            LEFT JOIN members m ON m.id = t.member_id
            WHERE (?1 IS NULL OR c.book_id = ?1)
              AND (?2 IS NULL
                   OR LOWER(b.title) LIKE ?2
                   OR LOWER(COALESCE(b.author, '')) LIKE ?2
                   OR LOWER(COALESCE(c.accession_no, '')) LIKE ?2)
              AND (?5 IS NULL
                   OR (?5 = 'Available' AND t.id IS NULL)
                   OR (?5 = 'Issued' AND t.id IS NOT NULL))
            ORDER BY b.title, c.id
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(query.book_id)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .bind(query.availability.map(|a| a.to_string()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CopyListing::from).collect())
    }

    /// Insert a copy unless its accession number is already taken.
    /// Returns the stored row and whether it was newly created.
    pub async fn insert_if_absent(&self, copy: &CreateCopy) -> AppResult<(BookCopy, bool)> {
        let inserted = sqlx::query_as::<_, CopyRow>(
            r#"
            INSERT INTO copies (accession_no, book_id, condition, acquired_date, purchase_price, current_location)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&copy.accession_no)
        .bind(copy.book_id)
        .bind(copy.condition)
        .bind(copy.acquired_date)
        .bind(copy.purchase_price.map(|p| p.to_string()))
        .bind(&copy.current_location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_foreign_key_violation(e, format!("Book with id {} not found", copy.book_id))
        })?;

        match (inserted, copy.accession_no.as_deref()) {
            (Some(row), _) => Ok((row.into(), true)),
            (None, Some(accession_no)) => Ok((self.get_by_accession(accession_no).await?, false)),
            (None, None) => Err(AppError::Internal(
                "Copy without accession number was rejected".to_string(),
            )),
        }
    }

    pub async fn update(&self, id: i64, changes: &CopyChanges) -> AppResult<BookCopy> {
        sqlx::query_as::<_, CopyRow>(
            r#"
            UPDATE copies
            SET accession_no = ?, condition = ?, purchase_price = ?, current_location = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&changes.accession_no)
        .bind(changes.condition)
        .bind(changes.purchase_price.map(|p| p.to_string()))
        .bind(&changes.current_location)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(
                e,
                format!(
                    "Accession number {} is already in use",
                    changes.accession_no.as_deref().unwrap_or_default()
                ),
            )
        })?
        .map(BookCopy::from)
        .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))
    }

    /// Title of the book a copy belongs to
    pub async fn title_of(&self, copy_id: i64) -> AppResult<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT b.title FROM copies c JOIN books b ON b.id = c.book_id WHERE c.id = ?",
        )
        .bind(copy_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", copy_id)))
    }

    /// Every copy with all stored columns, unpaged, in id order
    pub async fn all(&self) -> AppResult<Vec<BookCopy>> {
        let rows = sqlx::query_as::<_, CopyRow>("SELECT * FROM copies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookCopy::from).collect())
    }
}
