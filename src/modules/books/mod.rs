pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Migration, Module};
use once_cell::sync::OnceCell;

use repository::SqliteBookRepository;
use service::CatalogService;

/// Book catalog: storefront listing plus admin CRUD
pub struct BooksModule {
    service: OnceCell<CatalogService>,
}

impl BooksModule {
    pub const fn new() -> Self {
        Self {
            service: OnceCell::new(),
        }
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let repository = SqliteBookRepository::new(ctx.db.clone());
        if self
            .service
            .set(CatalogService::new(Arc::new(repository)))
            .is_err()
        {
            tracing::warn!(module = self.name(), "books module already initialized");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        match self.service.get() {
            Some(service) => handlers::router(service.clone()),
            None => {
                tracing::error!(
                    module = self.name(),
                    "routes requested before init; books endpoints are not mounted"
                );
                Router::new()
            }
        }
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::document())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: repository::CREATE_BOOKS,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
