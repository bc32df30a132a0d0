mod models;
pub mod queries;
pub mod repository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

use crate::config::DatabaseSettings;

pub use models::{Category, NewQuestion, Question};
pub use repository::{SqliteRepository, TriviaRepository};

pub const IN_MEMORY: &str = ":memory:";

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<SqlitePool, Error> {
    if settings.path == IN_MEMORY {
        // every connection to :memory: is a separate database, so keep exactly one alive
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }
    let options =
        SqliteConnectOptions::from_str(&format!("sqlite:{}", settings.path))?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
