//! Shared fixtures for unit tests.

use tempfile::TempDir;

use crate::db::Database;
use crate::utils::db_utils::FieldValues;

/// A migrated database in its own scratch directory.
///
/// Keep the `TempDir` alive for the duration of the test.
pub async fn scratch_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db = Database::new(&dir.path().join("funcionarios.db"));
    db.ensure_schema("admin", "admin").await.unwrap();
    (dir, db)
}

pub fn fields(items: &[(&str, &str)]) -> FieldValues {
    FieldValues::from_pairs(
        items
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    )
    .unwrap()
}
