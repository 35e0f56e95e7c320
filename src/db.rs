use actix_web::web;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type RqDbPool = web::Data<DbPool>;

pub fn initialize_db_pool(db_path: &str) -> AppResult<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    r2d2::Pool::builder().build(manager).map_err(|e| {
        AppError::ConfigurationError(format!("database {db_path} is not usable: {e}"))
    })
}

pub fn run_migrations(pool: &DbPool) -> AppResult<()> {
    tracing::info!("Running database migrations");
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        tracing::error!("Failed to run migrations: {}", e);
        AppError::DatabaseError
    })?;
    Ok(())
}
