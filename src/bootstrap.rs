//! Startup and shutdown sequence shared by the binaries.

use anyhow::Context;
use bookstore_db::{apply_migrations, Database};
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every application module.
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize modules, apply their migrations and start them.
pub async fn assemble(settings: &Settings, db: &Database) -> anyhow::Result<ModuleRegistry> {
    let registry = build_registry();
    let ctx = InitCtx { settings, db };

    registry.init_modules(&ctx).await?;

    let applied = apply_migrations(db, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations complete");

    registry.start_modules(&ctx).await?;

    Ok(registry)
}

/// Run the HTTP server until a shutdown signal, then stop modules and close the pool.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let db = Database::connect(&settings.database).await?;
    let registry = assemble(settings, &db).await?;

    tracing::info!(modules = registry.module_count(), "bookstore bootstrap complete");

    let served = bookstore_http::start_server(&registry, settings).await;

    let stopped = shutdown(&registry, &db).await;

    served?;
    stopped
}

/// Stop every module, then close the pool even when a module fails to stop.
pub async fn shutdown(registry: &ModuleRegistry, db: &Database) -> anyhow::Result<()> {
    let stopped = registry.stop_modules().await;
    if let Err(err) = &stopped {
        tracing::error!(error = ?err, "module shutdown failed");
    }

    db.close().await;
    stopped
}

/// Apply pending migrations without serving. Returns how many were applied.
pub async fn run_migrations(settings: &Settings) -> anyhow::Result<usize> {
    let db = Database::connect(&settings.database).await?;
    let registry = build_registry();

    let applied = apply_migrations(&db, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;

    db.close().await;
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookstore_kernel::Module;
    use std::sync::Arc;

    struct StuckModule;

    #[async_trait]
    impl Module for StuckModule {
        fn name(&self) -> &'static str {
            "stuck"
        }

        async fn stop(&self) -> anyhow::Result<()> {
            anyhow::bail!("refused to stop")
        }
    }

    #[tokio::test]
    async fn assemble_migrates_and_registers_books() {
        let settings = Settings::default();
        let db = Database::connect_in_memory().await.unwrap();

        let registry = assemble(&settings, &db).await.unwrap();
        assert!(registry.get_module("books").is_some());

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, 1);

        // Second pass finds nothing left to apply
        let again = apply_migrations(&db, &registry.collect_migrations())
            .await
            .unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn shutdown_closes_pool_when_a_module_fails_to_stop() {
        let db = Database::connect_in_memory().await.unwrap();
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(StuckModule));

        let err = shutdown(&registry, &db).await.unwrap_err();
        assert!(format!("{err:#}").contains("refused to stop"));
        assert!(db.pool().is_closed());
    }
}
