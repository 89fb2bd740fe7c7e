//! Catalog management service: books, copies, bulk import and labels

use validator::Validate;

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        clean,
        copy::{BookCopy, CopyLabel, CopyListing, CopyQuery, CreateCopy, UpdateCopy},
        import_report::ImportReport,
    },
    repository::{copies::CopyChanges, Repository},
};

/// Text handed to a label/QR encoder: `PREFIX|accession|title`.
/// A copy without an accession number renders as `N/A`.
pub fn label_payload(prefix: &str, accession_no: Option<&str>, title: &str) -> String {
    format!("{}|{}|{}", prefix, accession_no.unwrap_or("N/A"), title)
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: LibraryConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: LibraryConfig) -> Self {
        Self { repository, config }
    }

    /// Create a book. Re-submitting an identical book returns the stored
    /// row with `false` instead of failing.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<(Book, bool)> {
        let book = book.normalized();
        book.validate()?;

        let (stored, created) = self.repository.books.insert_if_absent(&book).await?;
        if created {
            tracing::info!(book_id = stored.id, title = %stored.title, "Book created");
        } else {
            tracing::debug!(book_id = stored.id, "Identical book already cataloged");
        }
        Ok((stored, created))
    }

    /// Import already-parsed book rows. Blank titles are skipped and
    /// identical rows collapse into one title.
    pub async fn import_books(&self, rows: Vec<CreateBook>) -> AppResult<ImportReport> {
        let mut report = ImportReport {
            received: rows.len(),
            ..Default::default()
        };

        for (index, row) in rows.into_iter().enumerate() {
            let row = row.normalized();
            if row.title.is_empty() {
                report.skipped += 1;
                continue;
            }
            if let Err(errors) = row.validate() {
                report.skipped += 1;
                report.warnings.push(format!("Row {}: {}", index + 1, errors));
                continue;
            }

            let (_, created) = self.repository.books.insert_if_absent(&row).await?;
            if created {
                report.created += 1;
            } else {
                report.duplicates += 1;
            }
        }

        tracing::info!(
            received = report.received,
            created = report.created,
            duplicates = report.duplicates,
            skipped = report.skipped,
            "Book import finished"
        );
        Ok(report)
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Update a book. Books referenced by copies are immutable.
    pub async fn update_book(&self, id: i64, changes: UpdateBook) -> AppResult<Book> {
        changes.validate()?;
        let current = self.repository.books.get_by_id(id).await?;

        let updated = changes.apply(&current);
        updated.validate()?;
        self.repository.books.update(id, &updated).await
    }

    /// Copies of one book with their loan status
    pub async fn copies_for_book(&self, book_id: i64) -> AppResult<Vec<CopyListing>> {
        self.repository.books.get_by_id(book_id).await?;
        let query = CopyQuery {
            book_id: Some(book_id),
            ..Default::default()
        };
        self.repository.copies.list(&query).await
    }

    /// Add a physical copy. A copy whose accession number is already in use
    /// is not inserted again; the stored copy is returned with `false`.
    pub async fn create_copy(&self, copy: CreateCopy) -> AppResult<(BookCopy, bool)> {
        let copy = CreateCopy {
            accession_no: clean(copy.accession_no),
            current_location: clean(copy.current_location),
            ..copy
        };
        copy.validate()?;
        if copy.purchase_price.map(|p| p.is_sign_negative()).unwrap_or(false) {
            return Err(AppError::Validation("Purchase price cannot be negative".to_string()));
        }
        if !self.repository.books.exists(copy.book_id).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", copy.book_id)));
        }

        let (stored, created) = self.repository.copies.insert_if_absent(&copy).await?;
        if created {
            tracing::info!(copy_id = stored.id, book_id = stored.book_id, "Copy created");
        } else {
            tracing::debug!(copy_id = stored.id, "Accession number already registered");
        }
        Ok((stored, created))
    }

    pub async fn get_copy(&self, id: i64) -> AppResult<BookCopy> {
        self.repository.copies.get_by_id(id).await
    }

    pub async fn list_copies(&self, query: &CopyQuery) -> AppResult<Vec<CopyListing>> {
        self.repository.copies.list(query).await
    }

    /// Change condition, location, price or accession number of a copy
    pub async fn update_copy(&self, id: i64, changes: UpdateCopy) -> AppResult<BookCopy> {
        let current = self.repository.copies.get_by_id(id).await?;
        let changes = UpdateCopy {
            accession_no: changes.accession_no.map(|a| a.trim().to_string()),
            ..changes
        };
        changes.validate()?;
        if changes.purchase_price.map(|p| p.is_sign_negative()).unwrap_or(false) {
            return Err(AppError::Validation("Purchase price cannot be negative".to_string()));
        }

        let merged = CopyChanges {
            accession_no: changes.accession_no.or(current.accession_no),
            condition: changes.condition.unwrap_or(current.condition),
            purchase_price: changes.purchase_price.or(current.purchase_price),
            current_location: clean(changes.current_location).or(current.current_location),
        };
        self.repository.copies.update(id, &merged).await
    }

    /// Label payload for a copy
    pub async fn label(&self, copy_id: i64) -> AppResult<CopyLabel> {
        let copy = self.repository.copies.get_by_id(copy_id).await?;
        let title = self.repository.copies.title_of(copy_id).await?;
        Ok(CopyLabel {
            copy_id,
            payload: label_payload(&self.config.label_prefix, copy.accession_no.as_deref(), &title),
        })
    }
}
