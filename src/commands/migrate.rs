//! Migrate command - Wallet schema migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

fn migration_error(e: sea_orm::DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", e))
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are applied explicitly here, so skip the automatic
    // run that `serve` performs on connect.
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(migration_error)?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending wallet schema migrations...");
            db.run_migrations().await.map_err(migration_error)?;
            tracing::info!("Wallet schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last wallet schema migration...");
            db.rollback_migration().await.map_err(migration_error)?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(migration_error)? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping the wallet schema and re-running all migrations...");
            db.fresh_migrations().await.map_err(migration_error)?;
            tracing::info!("Fresh wallet schema created");
        }
    }

    Ok(())
}
