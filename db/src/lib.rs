pub mod capabilities;
pub mod models;
pub mod sync;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

/// Opens the configured database.
///
/// `DATABASE_PATH` may be a full DSN or a plain SQLite file path. For a path,
/// missing parent directories are created and `?mode=rwc` lets SQLite create the file.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let path_or_url = config::database_path();
    let url = if path_or_url.starts_with("sqlite:") {
        path_or_url
    } else {
        if let Some(parent) = Path::new(&path_or_url).parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %err, "Could not create database directory");
            }
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    tracing::debug!(url = %url, "Connecting to database");
    Database::connect(&url).await
}
