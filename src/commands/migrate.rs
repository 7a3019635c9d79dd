//! `migrate` subcommand: manages the users schema without starting the store.

use serde::Serialize;

use super::print_json;
use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

#[derive(Debug, Serialize)]
struct MigrationState {
    migration: String,
    applied: bool,
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Users schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Reverted the latest users schema migration");
        }
        MigrateAction::Status => {
            let states: Vec<MigrationState> = db
                .migration_status()
                .await?
                .into_iter()
                .map(|(migration, applied)| MigrationState { migration, applied })
                .collect();
            print_json(&states)?;
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping the users table, stored users will be lost");
            db.fresh_migrations().await?;
            tracing::info!("Users schema recreated empty");
        }
    }

    Ok(())
}
