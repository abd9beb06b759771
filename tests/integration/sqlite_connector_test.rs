//! SeaORM connector against a real SQLite file
//!
//! Run with: cargo test --features sqlite sqlite_connector

#![cfg(feature = "sqlite")]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pastel_bridge::database::{DatabasePool, PoolConfiguration, SeaOrmConnector, SqlDialect, Value};
use pastel_bridge::query::{Filter, PageRequest, ResourceQueryEngine, ResourceSchema};
use pastel_bridge::resources::INVENTORY_CATEGORIES;
use sea_orm::{ConnectionTrait, Database};
use serde_json::json;

struct TempDatabase {
    path: PathBuf,
    url: String,
}

impl TempDatabase {
    async fn create(name: &str, statements: &[&str]) -> Self {
        let path = std::env::temp_dir().join(format!("pastel-bridge-{name}-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let db = Database::connect(&url).await.unwrap();
        for statement in statements {
            db.execute_unprepared(statement).await.unwrap();
        }
        db.close().await.unwrap();

        Self { path, url }
    }

    fn engine(&self) -> ResourceQueryEngine {
        let connector = SeaOrmConnector::new(self.url.clone(), Duration::from_secs(5));
        let pool = DatabasePool::new(Arc::new(connector), PoolConfiguration::default(), None);
        ResourceQueryEngine::new(pool)
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[tokio::test]
async fn test_pages_through_sqlite_table() {
    let db = TempDatabase::create(
        "categories",
        &[
            "CREATE TABLE InventoryCategory (ICCode TEXT, ICDesc TEXT)",
            "INSERT INTO InventoryCategory VALUES ('TOOL', 'Hand tools'), ('FAST  ', 'Fasteners'), ('SERV', 'Services')",
        ],
    )
    .await;
    let engine = db.engine();
    assert_eq!(engine.pool().dialect(), SqlDialect::Sqlite);

    let first = engine
        .paginate(
            &INVENTORY_CATEGORIES,
            PageRequest {
                limit: 2,
                cursor: None,
                filters: Vec::new(),
            },
        )
        .await
        .unwrap();

    assert_eq!(first.data[0].get("ic_code"), Some(&json!("FAST")));
    assert_eq!(first.data[1].get("ic_code"), Some(&json!("SERV")));
    assert!(first.has_more());

    let second = engine
        .paginate(
            &INVENTORY_CATEGORIES,
            PageRequest {
                limit: 2,
                cursor: first.next_cursor().map(str::to_string),
                filters: Vec::new(),
            },
        )
        .await
        .unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(second.data[0].get("ic_desc"), Some(&json!("Hand tools")));
    assert!(!second.has_more());

    assert_eq!(engine.pool().available_slots(), engine.pool().max_connections());
}

#[tokio::test]
async fn test_padded_key_is_not_served_twice() {
    let db = TempDatabase::create(
        "padded",
        &[
            "CREATE TABLE InventoryCategory (ICCode TEXT, ICDesc TEXT)",
            "INSERT INTO InventoryCategory VALUES ('FAST  ', 'Fasteners'), ('SERV', 'Services')",
        ],
    )
    .await;
    let engine = db.engine();

    let mut seen = Vec::new();
    let mut cursor = None;

    for _ in 0..4 {
        let page = engine
            .paginate(
                &INVENTORY_CATEGORIES,
                PageRequest {
                    limit: 1,
                    cursor: cursor.clone(),
                    filters: Vec::new(),
                },
            )
            .await
            .unwrap();

        seen.extend(page.data.iter().map(|record| record.get("ic_code").cloned()));
        cursor = page.next_cursor().map(str::to_string);
        if cursor.is_none() {
            break;
        }
    }

    assert_eq!(seen, vec![Some(json!("FAST")), Some(json!("SERV"))]);
}

#[tokio::test]
async fn test_typed_columns_and_filters() {
    let db = TempDatabase::create(
        "ledger",
        &[
            "CREATE TABLE Ledger (AutoNumber INTEGER, DDate TEXT, Amount REAL, Description TEXT)",
            "INSERT INTO Ledger VALUES \
             (1, '2024-01-15', 1150.0, 'Invoice INV0001'), \
             (2, '2024-02-03', 250.0, 'Cash receipt'), \
             (3, '2024-02-20', 98.75, 'Invoice INV0002')",
        ],
    )
    .await;
    let engine = db.engine();

    let schema = ResourceSchema::builder("ledger", "Ledger")
        .integer("AutoNumber")
        .date("DDate")
        .decimal("Amount")
        .text("Description")
        .key(&["AutoNumber"])
        .build();

    let page = engine
        .paginate(
            &schema,
            PageRequest {
                limit: 10,
                cursor: None,
                filters: vec![Filter::contains("Description", "Invoice"), Filter::gte("Amount", 100.0)],
            },
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.data[0].get("auto_number"), Some(&json!(1)));
    assert_eq!(page.data[0].get("d_date"), Some(&json!("2024-01-15")));
    assert_eq!(page.data[0].get("amount"), Some(&json!(1150.0)));

    let found = engine.find(&schema, vec![Value::Int(3)]).await.unwrap().unwrap();
    assert_eq!(found.get("description"), Some(&json!("Invoice INV0002")));
}

#[tokio::test]
async fn test_unreachable_file_is_connection_error() {
    let connector = SeaOrmConnector::new(
        "sqlite:///nonexistent-dir/pastel-bridge/missing.db?mode=ro",
        Duration::from_secs(1),
    );
    let pool = DatabasePool::new(Arc::new(connector), PoolConfiguration::default(), None);

    let result = pool.ping().await;
    assert!(matches!(
        result,
        Err(pastel_bridge::database::DatabaseError::ConnectionError(_))
    ));
}
