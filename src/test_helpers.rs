use tempfile::TempDir;

use crate::db::{initialize_db_pool, run_migrations, DbPool};

/// Create a migrated test database in a temporary directory
pub fn create_test_db() -> (TempDir, DbPool) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let pool = initialize_db_pool(&db_path.display().to_string()).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    (temp_dir, pool)
}
