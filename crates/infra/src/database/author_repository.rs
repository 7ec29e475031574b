//! Author repository implementation using SQLite
//!
//! Implements the `AuthorRepository` port over the pooled connection
//! manager. Connections are used inside `spawn_blocking` so the async
//! boundary never blocks an executor thread on SQLite I/O.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::catalog::ports::AuthorRepository as AuthorRepositoryPort;
use folio_domain::{Author, Book, CatalogError, Genre, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use crate::errors::{is_unique_violation, map_join_error, map_sql_error};

const AUTHOR_COLUMNS: &str = "id, first_name, last_name, email, birth_date";

/// SQLite-backed implementation of `AuthorRepository`
pub struct SqliteAuthorRepository {
    db: Arc<DbManager>,
}

impl SqliteAuthorRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn get_all(&self) -> Result<Vec<Author>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<Author>> {
            let conn = db.get_connection()?;
            query_authors(&conn, &format!("SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY rowid"))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_all_with_books(&self) -> Result<Vec<Author>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<Author>> {
            let conn = db.get_connection()?;
            let mut authors = query_authors(
                &conn,
                &format!("SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY rowid"),
            )?;

            let mut books_by_author = load_books(&conn)?;
            for author in &mut authors {
                author.books = books_by_author.remove(&author.id).unwrap_or_default();
            }
            Ok(authors)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Option<Author>> {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?1"),
                params![id.to_string()],
                map_author_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>> {
        let db = Arc::clone(&self.db);
        let email = email.to_owned();

        task::spawn_blocking(move || -> Result<Option<Author>> {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!(
                    "SELECT {AUTHOR_COLUMNS} FROM authors WHERE lower(email) = lower(?1)"
                ),
                params![email],
                map_author_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_filter(&self, first_name: &str, last_name: &str) -> Result<Vec<Author>> {
        let db = Arc::clone(&self.db);
        let first_name = first_name.to_owned();
        let last_name = last_name.to_owned();

        task::spawn_blocking(move || -> Result<Vec<Author>> {
            let conn = db.get_connection()?;
            // instr() keeps containment case-sensitive; LIKE would fold
            // ASCII case.
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {AUTHOR_COLUMNS} FROM authors
                     WHERE (?1 = '' OR instr(first_name, ?1) > 0)
                       AND (?2 = '' OR instr(last_name, ?2) > 0)
                     ORDER BY rowid"
                ))
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![first_name, last_name], map_author_row)
                .map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_page(&self, page: u32, page_size: u32) -> Result<Vec<Author>> {
        let db = Arc::clone(&self.db);
        let limit = i64::from(page_size);
        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);

        task::spawn_blocking(move || -> Result<Vec<Author>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY rowid LIMIT ?1 OFFSET ?2"
                ))
                .map_err(map_sql_error)?;

            let rows =
                stmt.query_map(params![limit, offset], map_author_row).map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn add(&self, author: Author) -> Result<Author> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Author> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO authors (id, first_name, last_name, email, birth_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    author.id.to_string(),
                    author.first_name,
                    author.last_name,
                    author.email,
                    author.birth_date.to_rfc3339(),
                ],
            )
            .map_err(|err| rewrite_email_conflict(err, &author.email))?;
            Ok(author)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, author: Author) -> Result<Uuid> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Uuid> {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE authors
                     SET first_name = ?2, last_name = ?3, email = ?4, birth_date = ?5
                     WHERE id = ?1",
                    params![
                        author.id.to_string(),
                        author.first_name,
                        author.last_name,
                        author.email,
                        author.birth_date.to_rfc3339(),
                    ],
                )
                .map_err(|err| rewrite_email_conflict(err, &author.email))?;

            if updated == 0 {
                return Err(CatalogError::NotFound(format!(
                    "Author with ID '{}' not found.",
                    author.id
                )));
            }
            Ok(author.id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Author>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Option<Author>> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            let snapshot = tx
                .query_row(
                    &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?1"),
                    params![id.to_string()],
                    map_author_row,
                )
                .optional()
                .map_err(map_sql_error)?;

            let Some(author) = snapshot else {
                return Ok(None);
            };

            tx.execute("DELETE FROM authors WHERE id = ?1", params![id.to_string()])
                .map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(Some(author))
        })
        .await
        .map_err(map_join_error)?
    }
}

fn query_authors(conn: &Connection, sql: &str) -> Result<Vec<Author>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let rows = stmt.query_map(params![], map_author_row).map_err(map_sql_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
}

/// Load every book with its genres, grouped by owning author.
fn load_books(conn: &Connection) -> Result<HashMap<Uuid, Vec<Book>>> {
    let mut genres_by_book: HashMap<Uuid, Vec<Genre>> = HashMap::new();
    {
        let mut stmt = conn
            .prepare(
                "SELECT bg.book_id, g.id, g.name, g.description
                 FROM book_genres bg
                 JOIN genres g ON g.id = bg.genre_id
                 ORDER BY g.name",
            )
            .map_err(map_sql_error)?;

        let rows = stmt
            .query_map(params![], |row| {
                let book_id = parse_uuid(row, 0)?;
                let genre = Genre {
                    id: parse_uuid(row, 1)?,
                    name: row.get(2)?,
                    description: row.get(3)?,
                };
                Ok((book_id, genre))
            })
            .map_err(map_sql_error)?;

        for row in rows {
            let (book_id, genre) = row.map_err(map_sql_error)?;
            genres_by_book.entry(book_id).or_default().push(genre);
        }
    }

    let mut books_by_author: HashMap<Uuid, Vec<Book>> = HashMap::new();
    let mut stmt = conn
        .prepare(
            "SELECT id, title, release_year, price_cents, author_id
             FROM books ORDER BY rowid",
        )
        .map_err(map_sql_error)?;

    let rows = stmt
        .query_map(params![], |row| {
            Ok(Book {
                id: parse_uuid(row, 0)?,
                title: row.get(1)?,
                release_year: row.get(2)?,
                price_cents: row.get(3)?,
                author_id: parse_uuid(row, 4)?,
                genres: Vec::new(),
            })
        })
        .map_err(map_sql_error)?;

    for row in rows {
        let mut book = row.map_err(map_sql_error)?;
        book.genres = genres_by_book.remove(&book.id).unwrap_or_default();
        books_by_author.entry(book.author_id).or_default().push(book);
    }

    Ok(books_by_author)
}

fn map_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: parse_uuid(row, 0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        birth_date: parse_datetime(row, 4)?,
        books: Vec::new(),
    })
}

fn parse_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let value: String = row.get(idx)?;
    Uuid::parse_str(&value)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn parse_datetime(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

/// Rewrite the store's unique-index violation into the caller-facing
/// conflict message, preserving the offending email.
fn rewrite_email_conflict(err: rusqlite::Error, email: &str) -> CatalogError {
    let mapped = map_sql_error(err);
    if is_unique_violation(&mapped) {
        return CatalogError::Conflict(format!("Author with email '{email}' already exists."));
    }
    mapped
}
