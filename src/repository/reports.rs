//! Aggregate queries behind the reporting views

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::report::{GenreCount, OverdueEntry},
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Sqlite>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn count_titles(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_copies(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Transactions with no return date
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE return_date IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM transactions
            WHERE return_date IS NULL AND due_date IS NOT NULL AND due_date < ?
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Titles per genre, largest group first
    pub async fn titles_by_genre(&self) -> AppResult<Vec<GenreCount>> {
        let rows = sqlx::query_as::<_, GenreCount>(
            r#"
            SELECT genre, COUNT(*) AS titles
            FROM books
            GROUP BY genre
            ORDER BY titles DESC, genre
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open loans past their due date as of `today`, earliest due date first
    pub async fn overdue(&self, today: NaiveDate) -> AppResult<Vec<OverdueEntry>> {
        let rows = sqlx::query_as::<_, OverdueEntry>(
            r#"
            SELECT t.id AS transaction_id, c.accession_no, b.title,
                   m.id AS member_id, m.name AS member_name,
                   t.issue_date, t.due_date,
                   CAST(julianday(?1) - julianday(t.due_date) AS INTEGER) AS days_overdue
            FROM transactions t
            JOIN copies c ON c.id = t.copy_id
            JOIN books b ON b.id = c.book_id
            JOIN members m ON m.id = t.member_id
            WHERE t.return_date IS NULL
              AND t.due_date IS NOT NULL
              AND t.due_date < ?1
            ORDER BY t.due_date ASC, t.id ASC
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
