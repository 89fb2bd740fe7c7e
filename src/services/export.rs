//! Snapshot export of the whole store

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        book::Book, copy::BookCopy, export::LibrarySnapshot, location::Location, member::Member,
        transaction::Transaction,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ExportService {
    repository: Repository,
}

impl ExportService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.all().await
    }

    pub async fn copies(&self) -> AppResult<Vec<BookCopy>> {
        self.repository.copies.all().await
    }

    pub async fn members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.all().await
    }

    pub async fn transactions(&self) -> AppResult<Vec<Transaction>> {
        self.repository.transactions.all().await
    }

    pub async fn locations(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list().await
    }

    /// Every table in one document
    pub async fn snapshot(&self) -> AppResult<LibrarySnapshot> {
        let snapshot = LibrarySnapshot {
            exported_at: Utc::now(),
            books: self.books().await?,
            copies: self.copies().await?,
            members: self.members().await?,
            transactions: self.transactions().await?,
            locations: self.locations().await?,
        };

        tracing::info!(
            books = snapshot.books.len(),
            copies = snapshot.copies.len(),
            members = snapshot.members.len(),
            transactions = snapshot.transactions.len(),
            "Snapshot exported"
        );
        Ok(snapshot)
    }
}
