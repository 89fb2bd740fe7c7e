//! Issue/return workflow and availability resolution.
//!
//! A copy is `Issued` exactly when the ledger holds an open transaction for
//! it; nothing about loan status is stored on the copy itself.

use chrono::{Duration, NaiveDate};

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
    models::{
        copy::BookCopy,
        member::Member,
        transaction::{
            Availability, CopyStatus, IssueCopy, Transaction, TransactionDetails, TransactionQuery,
        },
    },
    repository::Repository,
};

use super::today;

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
    config: LibraryConfig,
}

impl LendingService {
    pub fn new(repository: Repository, config: LibraryConfig) -> Self {
        Self { repository, config }
    }

    /// Issue a copy to a member.
    ///
    /// Fails with `Validation` when the due date precedes the issue date,
    /// `NotFound` when the copy or member is unknown and `Conflict` when the
    /// copy is already on loan. The open-loan check and the insert are one
    /// statement guarded by a unique index, so concurrent issues of the same
    /// copy cannot both succeed.
    pub async fn issue(&self, request: IssueCopy) -> AppResult<Transaction> {
        let (issue_date, due_date) = self.loan_period(request.issue_date, request.due_date)?;

        let copy = self
            .resolve_copy(request.copy_id, request.accession_no.as_deref())
            .await?;
        let member = self.repository.members.get_by_id(request.member_id).await?;

        let transaction = self
            .repository
            .transactions
            .insert_open(copy.id, member.id, issue_date, due_date)
            .await?;

        tracing::info!(
            transaction_id = transaction.id,
            copy_id = copy.id,
            member_id = member.id,
            %due_date,
            "Copy issued"
        );
        Ok(transaction)
    }

    /// Close a loan. `return_date` defaults to today.
    ///
    /// A second return of the same transaction is a `Conflict` and leaves
    /// the stored return date untouched.
    pub async fn return_transaction(
        &self,
        transaction_id: i64,
        return_date: Option<NaiveDate>,
    ) -> AppResult<Transaction> {
        let return_date = return_date.unwrap_or_else(today);
        let transaction = self.repository.transactions.get_by_id(transaction_id).await?;

        if let Some(returned) = transaction.return_date {
            return Err(AppError::Conflict(format!(
                "Transaction {} was already returned on {}",
                transaction_id, returned
            )));
        }
        if return_date < transaction.issue_date {
            return Err(AppError::Validation(format!(
                "Return date {} is before issue date {}",
                return_date, transaction.issue_date
            )));
        }

        let closed = self
            .repository
            .transactions
            .close(transaction_id, return_date)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!("Transaction {} was already returned", transaction_id))
            })?;

        tracing::info!(
            transaction_id,
            copy_id = closed.copy_id,
            %return_date,
            "Copy returned"
        );
        Ok(closed)
    }

    /// `Issued` while the copy has an open transaction, else `Available`
    pub async fn availability(&self, copy_id: i64) -> AppResult<Availability> {
        Ok(self.copy_status(copy_id).await?.availability)
    }

    /// Member currently holding the copy, if it is on loan
    pub async fn current_holder(&self, copy_id: i64) -> AppResult<Option<Member>> {
        self.repository.copies.get_by_id(copy_id).await?;
        match self.repository.transactions.open_for_copy(copy_id).await? {
            Some((_, holder)) => Ok(Some(self.repository.members.get_by_id(holder.id).await?)),
            None => Ok(None),
        }
    }

    /// Availability, holder and open loan of a copy
    pub async fn copy_status(&self, copy_id: i64) -> AppResult<CopyStatus> {
        let copy = self.repository.copies.get_by_id(copy_id).await?;
        self.status_of(&copy).await
    }

    /// Same as `copy_status`, addressing the copy by accession number
    pub async fn copy_status_by_accession(&self, accession_no: &str) -> AppResult<CopyStatus> {
        let copy = self.repository.copies.get_by_accession(accession_no).await?;
        self.status_of(&copy).await
    }

    /// Transaction history, newest first
    pub async fn history(&self, query: &TransactionQuery) -> AppResult<Vec<TransactionDetails>> {
        let limit = query
            .limit
            .unwrap_or(self.config.history_limit)
            .clamp(1, 10_000);
        self.repository.transactions.history(query, limit).await
    }

    pub async fn get_transaction(&self, id: i64) -> AppResult<Transaction> {
        self.repository.transactions.get_by_id(id).await
    }

    async fn status_of(&self, copy: &BookCopy) -> AppResult<CopyStatus> {
        let open = self.repository.transactions.open_for_copy(copy.id).await?;
        let status = match open {
            Some((transaction, holder)) => CopyStatus {
                copy_id: copy.id,
                accession_no: copy.accession_no.clone(),
                availability: Availability::Issued,
                holder: Some(holder),
                transaction_id: Some(transaction.id),
                due_date: transaction.due_date,
            },
            None => CopyStatus {
                copy_id: copy.id,
                accession_no: copy.accession_no.clone(),
                availability: Availability::Available,
                holder: None,
                transaction_id: None,
                due_date: None,
            },
        };
        Ok(status)
    }

    async fn resolve_copy(&self, copy_id: Option<i64>, accession_no: Option<&str>) -> AppResult<BookCopy> {
        match (copy_id, accession_no.map(str::trim).filter(|a| !a.is_empty())) {
            (Some(id), _) => self.repository.copies.get_by_id(id).await,
            (None, Some(accession_no)) => self.repository.copies.get_by_accession(accession_no).await,
            (None, None) => Err(AppError::BadRequest(
                "copy_id or accession_no required".to_string(),
            )),
        }
    }

    /// Fill in default dates and reject a negative loan term
    fn loan_period(
        &self,
        issue_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
    ) -> AppResult<(NaiveDate, NaiveDate)> {
        let issue_date = issue_date.unwrap_or_else(today);
        let due_date = match due_date {
            Some(due_date) => due_date,
            None => issue_date
                .checked_add_signed(Duration::days(self.config.default_loan_days))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "Issue date {} leaves no room for a {} day loan",
                        issue_date, self.config.default_loan_days
                    ))
                })?,
        };

        if due_date < issue_date {
            return Err(AppError::Validation(format!(
                "Due date {} is before issue date {}",
                due_date, issue_date
            )));
        }
        Ok((issue_date, due_date))
    }
}
