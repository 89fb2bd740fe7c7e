//! Lending ledger repository.
//!
//! The ledger is the only source of truth for loan status. At most one open
//! row per copy is guaranteed by the `idx_transactions_open_copy` partial
//! unique index, so opening and closing a loan are single statements.

use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        member::MemberShort,
        transaction::{Transaction, TransactionDetails, TransactionQuery},
    },
};

#[derive(Debug, FromRow)]
struct OpenLoanRow {
    #[sqlx(flatten)]
    transaction: Transaction,
    member_name: String,
}

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Sqlite>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get transaction by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Transaction> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))
    }

    /// Open loan on a copy and its holder. The newest open row wins
    /// should more than one ever exist.
    pub async fn open_for_copy(&self, copy_id: i64) -> AppResult<Option<(Transaction, MemberShort)>> {
        let row = sqlx::query_as::<_, OpenLoanRow>(
            r#"
            SELECT t.*, m.name AS member_name
            FROM transactions t
            JOIN members m ON m.id = t.member_id
            WHERE t.copy_id = ? AND t.return_date IS NULL
            ORDER BY t.id DESC
            LIMIT 1
            "#,
        )
        .bind(copy_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            let holder = MemberShort {
                id: r.transaction.member_id,
                name: r.member_name,
            };
            (r.transaction, holder)
        }))
    }

    /// Open a loan. Fails with `Conflict` when the copy already has an open loan;
    /// nothing is written in that case.
    pub async fn insert_open(
        &self,
        copy_id: i64,
        member_id: i64,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Transaction> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (copy_id, member_id, issue_date, due_date)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(copy_id)
        .bind(member_id)
        .bind(issue_date)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => AppError::NotFound(
                format!("Copy {} or member {} not found", copy_id, member_id),
            ),
            _ => AppError::on_unique_violation(e, format!("Copy {} is already issued", copy_id)),
        })
    }

    /// Close an open loan. `None` when the row is missing or already closed.
    pub async fn close(&self, id: i64, return_date: NaiveDate) -> AppResult<Option<Transaction>> {
        let closed = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions SET return_date = ?
            WHERE id = ? AND return_date IS NULL
            RETURNING *
            "#,
        )
        .bind(return_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(closed)
    }

    /// Most recent transactions first
    pub async fn history(&self, query: &TransactionQuery, limit: i64) -> AppResult<Vec<TransactionDetails>> {
        let rows = sqlx::query_as::<_, TransactionDetails>(
            r#"
            SELECT t.id, t.copy_id, c.accession_no, b.title,
                   t.member_id, m.name AS member_name,
                   t.issue_date, t.due_date, t.return_date
            FROM transactions t
            JOIN copies c ON c.id = t.copy_id
            JOIN books b ON b.id = c.book_id
            JOIN members m ON m.id = t.member_id
            WHERE (?1 = 0 OR t.return_date IS NULL)
              AND (?2 IS NULL OR t.member_id = ?2)
            ORDER BY t.id DESC
            LIMIT ?3
            "#,
        )
        .bind(query.open_only)
        .bind(query.member_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The whole ledger, oldest first
    pub async fn all(&self) -> AppResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(transactions)
    }
}
