use anyhow::Context;
use async_trait::async_trait;
use bookstore_db::Database;
use time::OffsetDateTime;

use super::models::{Book, BookRecord};

/// Schema for the catalog; `available` is pinned to `stock > 0` by a CHECK.
pub(crate) const CREATE_BOOKS: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT    NOT NULL CHECK (title <> ''),
        author      TEXT    NOT NULL CHECK (author <> ''),
        genre       TEXT    NOT NULL CHECK (genre <> ''),
        publisher   TEXT    NOT NULL CHECK (publisher <> ''),
        price       REAL    NOT NULL CHECK (price >= 0),
        stock       INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
        description TEXT,
        image1      TEXT    NOT NULL CHECK (image1 <> ''),
        image2      TEXT    NOT NULL CHECK (image2 <> ''),
        available   INTEGER NOT NULL DEFAULT 0 CHECK (available = (stock > 0)),
        created_at  TEXT    NOT NULL,
        updated_at  TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS books_genre ON books (genre);
"#;

/// Durable storage for catalog entries.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, most recently created first
    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Book>>;

    /// Persist a new book; the store assigns id and timestamps
    async fn insert(&self, record: BookRecord) -> anyhow::Result<Book>;

    /// Replace every editable field; `None` when the id does not exist
    async fn update(&self, id: i64, record: BookRecord) -> anyhow::Result<Option<Book>>;

    /// Hard delete; `false` when the id does not exist
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;

    /// Genres present in the catalog, deduplicated and ascending
    async fn distinct_genres(&self) -> anyhow::Result<Vec<String>>;

    async fn ping(&self) -> anyhow::Result<()>;
}

pub struct SqliteBookRepository {
    db: Database,
}

impl SqliteBookRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, genre, publisher, price, stock, description,
                   image1, image2, available, created_at, updated_at
            FROM books
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .context("failed to list books")?;

        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, genre, publisher, price, stock, description,
                   image1, image2, available, created_at, updated_at
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .with_context(|| format!("failed to fetch book {id}"))?;

        Ok(book)
    }

    async fn insert(&self, record: BookRecord) -> anyhow::Result<Book> {
        let now = OffsetDateTime::now_utc();
        let available = record.available();

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, publisher, price, stock, description,
                               image1, image2, available, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, title, author, genre, publisher, price, stock, description,
                      image1, image2, available, created_at, updated_at
            "#,
        )
        .bind(record.title)
        .bind(record.author)
        .bind(record.genre)
        .bind(record.publisher)
        .bind(record.price)
        .bind(record.stock)
        .bind(record.description)
        .bind(record.image1)
        .bind(record.image2)
        .bind(available)
        .bind(now)
        .bind(now)
        .fetch_one(self.db.pool())
        .await
        .context("failed to insert book")?;

        Ok(book)
    }

    async fn update(&self, id: i64, record: BookRecord) -> anyhow::Result<Option<Book>> {
        let available = record.available();

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = ?, author = ?, genre = ?, publisher = ?, price = ?, stock = ?,
                description = ?, image1 = ?, image2 = ?, available = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, title, author, genre, publisher, price, stock, description,
                      image1, image2, available, created_at, updated_at
            "#,
        )
        .bind(record.title)
        .bind(record.author)
        .bind(record.genre)
        .bind(record.publisher)
        .bind(record.price)
        .bind(record.stock)
        .bind(record.description)
        .bind(record.image1)
        .bind(record.image2)
        .bind(available)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .with_context(|| format!("failed to update book {id}"))?;

        Ok(book)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .with_context(|| format!("failed to delete book {id}"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn distinct_genres(&self) -> anyhow::Result<Vec<String>> {
        let genres =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT genre FROM books ORDER BY genre ASC")
                .fetch_all(self.db.pool())
                .await
                .context("failed to list genres")?;

        Ok(genres)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.db.ping().await
    }
}
