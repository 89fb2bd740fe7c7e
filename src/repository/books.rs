//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
};

use super::{like_pattern, page};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search by title/author fragment and genre, ordered by title
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let pattern = like_pattern(query.q.as_deref());
        let (limit, offset) = page(query.limit, query.offset, 50);

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE (?1 IS NULL OR LOWER(title) LIKE ?1 OR LOWER(COALESCE(author, '')) LIKE ?1)
              AND (?2 IS NULL OR genre = ?2)
            ORDER BY title, id
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(pattern)
        .bind(query.genre.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Insert a book unless an identical record exists.
    /// Returns the stored row and whether it was newly created.
    pub async fn insert_if_absent(&self, book: &CreateBook) -> AppResult<(Book, bool)> {
        let inserted = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, publisher, year, isbn, default_location, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.publisher)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.default_location)
        .bind(&book.notes)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(created) = inserted {
            return Ok((created, true));
        }

        let existing = self.find_identical(book).await?.ok_or_else(|| {
            AppError::Internal(format!("Book '{}' was rejected but no identical row exists", book.title))
        })?;
        Ok((existing, false))
    }

    /// Find a book whose full field set matches, with NULL and empty treated alike
    pub async fn find_identical(&self, book: &CreateBook) -> AppResult<Option<Book>> {
        let found = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title = ?
              AND COALESCE(author, '') = COALESCE(?, '')
              AND COALESCE(genre, '') = COALESCE(?, '')
              AND COALESCE(publisher, '') = COALESCE(?, '')
              AND COALESCE(year, -1) = COALESCE(?, -1)
              AND COALESCE(isbn, '') = COALESCE(?, '')
              AND COALESCE(default_location, '') = COALESCE(?, '')
              AND COALESCE(notes, '') = COALESCE(?, '')
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.publisher)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.default_location)
        .bind(&book.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found)
    }

    /// Overwrite every field of a book that no copy references yet.
    /// The copy check is part of the UPDATE so a concurrent copy insert cannot slip past it.
    pub async fn update(&self, id: i64, book: &CreateBook) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = ?1, author = ?2, genre = ?3, publisher = ?4, year = ?5,
                isbn = ?6, default_location = ?7, notes = ?8
            WHERE id = ?9
              AND NOT EXISTS (SELECT 1 FROM copies WHERE book_id = ?9)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.publisher)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.default_location)
        .bind(&book.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(e, format!("An identical book to '{}' already exists", book.title))
        })?;

        match updated {
            Some(book) => Ok(book),
            None if self.exists(id).await? => Err(AppError::Conflict(format!(
                "Book {} has copies and can no longer be edited",
                id
            ))),
            None => Err(AppError::NotFound(format!("Book with id {} not found", id))),
        }
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    /// Every book, unpaged, in id order
    pub async fn all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }
}
