//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    notely_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("tenant"), "missing tenant table");
    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("note"), "missing note table");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    notely_db::run_migrations(&db).await.unwrap();
    // Second run must see version 1 as applied and do nothing.
    notely_db::run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn db_manager_connects_to_memory_endpoint() {
    let manager = notely_db::DbManager::connect(&notely_db::DbConfig::default())
        .await
        .unwrap();

    let mut result = manager.client().query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    assert!(info.is_some());
}
