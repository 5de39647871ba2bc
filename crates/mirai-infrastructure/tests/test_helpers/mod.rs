use mirai_infrastructure::persistence::{Database, DatabaseSettings};
use tempfile::TempDir;

/// Fresh migrated database in a temp directory. Keep the `TempDir` alive for
/// the duration of the test or the file vanishes under the pool.
pub async fn setup_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("mirai-test.db");
    let db = Database::open(
        path.to_str().expect("utf-8 path"),
        DatabaseSettings::default(),
    )
    .await
    .expect("open db");
    (db, dir)
}
