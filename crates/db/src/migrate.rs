use anyhow::Context;
use time::OffsetDateTime;

use crate::Database;

const LEDGER_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL,
        PRIMARY KEY (module, id)
    )
"#;

/// Migration definition contributed by a module
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// Apply every migration not yet recorded in the ledger, in the order given.
///
/// Each migration runs in its own transaction together with its ledger row, so a
/// failing script leaves neither partial schema nor a bogus record behind.
/// Returns the number of migrations applied by this call.
pub async fn apply_migrations(
    db: &Database,
    migrations: &[(String, Migration)],
) -> anyhow::Result<usize> {
    sqlx::query(LEDGER_DDL)
        .execute(db.pool())
        .await
        .context("failed to create migration ledger")?;

    let mut applied = 0;

    for (module, migration) in migrations {
        let seen: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM _migrations WHERE module = ? AND id = ?")
                .bind(module.as_str())
                .bind(migration.id)
                .fetch_one(db.pool())
                .await
                .with_context(|| format!("failed to read ledger for '{module}'"))?;

        if seen > 0 {
            tracing::debug!(module = %module, migration = migration.id, "migration already applied");
            continue;
        }

        let mut tx = db.pool().begin().await?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;

        sqlx::query("INSERT INTO _migrations (module, id, applied_at) VALUES (?, ?, ?)")
            .bind(module.as_str())
            .bind(migration.id)
            .bind(OffsetDateTime::now_utc())
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to record migration '{}/{}'", module, migration.id))?;

        tx.commit().await?;

        tracing::info!(module = %module, migration = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
