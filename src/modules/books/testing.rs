//! Fixtures shared by the books module tests.

use std::sync::Arc;

use async_trait::async_trait;
use bookstore_db::{apply_migrations, Database};
use bookstore_kernel::Module;
use serde_json::json;

use super::{
    models::{Book, BookInput, BookRecord, NumericInput},
    repository::{BookRepository, SqliteBookRepository},
    service::CatalogService,
    BooksModule,
};

/// Repository over a fresh, migrated in-memory database.
pub(crate) async fn repository() -> SqliteBookRepository {
    let db = Database::connect_in_memory().await.unwrap();
    let migrations: Vec<_> = BooksModule::new()
        .migrations()
        .into_iter()
        .map(|migration| ("books".to_string(), migration))
        .collect();
    apply_migrations(&db, &migrations).await.unwrap();
    SqliteBookRepository::new(db)
}

pub(crate) async fn service() -> CatalogService {
    CatalogService::new(Arc::new(repository().await))
}

/// A complete create/update body, the way the admin form submits it.
pub(crate) fn sample_input(title: &str, genre: &str, stock: &str) -> BookInput {
    BookInput {
        title: Some(title.to_string()),
        author: Some("Autora Uno".to_string()),
        genre: Some(genre.to_string()),
        publisher: Some("Editorial Norte".to_string()),
        price: Some(NumericInput::Text("19.99".to_string())),
        stock: Some(NumericInput::Text(stock.to_string())),
        description: None,
        image1: Some("https://img.example/cover.jpg".to_string()),
        image2: Some("https://img.example/back.jpg".to_string()),
    }
}

pub(crate) fn sample_body(title: &str, genre: &str, stock: &str) -> serde_json::Value {
    json!({
        "title": title,
        "author": "Autora Uno",
        "genre": genre,
        "publisher": "Editorial Norte",
        "price": "19.99",
        "stock": stock,
        "description": "",
        "image1": "https://img.example/cover.jpg",
        "image2": "https://img.example/back.jpg"
    })
}

/// Store whose every call fails, standing in for a lost database.
pub(crate) struct UnavailableRepository;

#[async_trait]
impl BookRepository for UnavailableRepository {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        anyhow::bail!("database is unavailable")
    }

    async fn find_by_id(&self, _id: i64) -> anyhow::Result<Option<Book>> {
        anyhow::bail!("database is unavailable")
    }

    async fn insert(&self, _record: BookRecord) -> anyhow::Result<Book> {
        anyhow::bail!("database is unavailable")
    }

    async fn update(&self, _id: i64, _record: BookRecord) -> anyhow::Result<Option<Book>> {
        anyhow::bail!("database is unavailable")
    }

    async fn delete(&self, _id: i64) -> anyhow::Result<bool> {
        anyhow::bail!("database is unavailable")
    }

    async fn distinct_genres(&self) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("database is unavailable")
    }

    async fn ping(&self) -> anyhow::Result<()> {
        anyhow::bail!("database is unavailable")
    }
}
