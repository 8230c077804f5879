#![cfg(feature = "rusqlite")]

use std::sync::Arc;

use embedded_dialect::prelude::*;
use tokio::runtime::Runtime;

fn kv_dialect() -> Result<EmbeddedDialect<RusqliteStorage>, Box<dyn std::error::Error>> {
    let storage = RusqliteStorage::open_in_memory()?;
    Ok(EmbeddedDialect::new(DialectConfig::new(Arc::new(storage))))
}

async fn create_kv_table(
    conn: &mut EmbeddedConnection<RusqliteStorage>,
) -> Result<(), DialectError> {
    conn.execute_query(&CompiledQuery::new_without_params(
        "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
    ))
    .await?;
    Ok(())
}

#[test]
fn select_returns_inserted_row() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dialect = kv_dialect()?;
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;

        let insert = conn
            .execute_query(&CompiledQuery::new(
                "INSERT INTO kv (key, value) VALUES (?, ?)",
                vec![Value::Text("a".into()), Value::Text("1".into())],
            ))
            .await?;
        assert_eq!(insert.num_affected_rows, Some(1));
        assert_eq!(insert.insert_id, None);
        assert!(insert.rows.is_empty());

        let select = conn
            .execute_query(&CompiledQuery::new(
                "SELECT value FROM kv WHERE key = ?",
                vec![Value::Text("a".into())],
            ))
            .await?;
        assert_eq!(select.rows.len(), 1);
        assert_eq!(
            select.rows[0].get("value").and_then(Value::as_text),
            Some("1")
        );
        assert_eq!(select.num_affected_rows, None);
        assert_eq!(select.insert_id, None);

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn upsert_overwrites_and_reports_write_count() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dialect = kv_dialect()?;
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;

        conn.execute_query(&CompiledQuery::new(
            "INSERT INTO kv (key, value) VALUES (?, ?)",
            vec![Value::Text("a".into()), Value::Text("1".into())],
        ))
        .await?;

        let upsert = conn
            .execute_query(&CompiledQuery::new(
                "INSERT INTO kv (key, value) VALUES (?, ?) \
                 ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                vec![Value::Text("a".into()), Value::Text("2".into())],
            ))
            .await?;
        let affected = upsert.num_affected_rows.expect("upsert writes rows");
        assert!(affected > 0);

        let select = conn
            .execute_query(&CompiledQuery::new(
                "SELECT value FROM kv WHERE key = ?",
                vec![Value::Text("a".into())],
            ))
            .await?;
        assert_eq!(
            select.rows[0].get("value").and_then(Value::as_text),
            Some("2")
        );

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn zero_write_delete_reports_no_count() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dialect = kv_dialect()?;
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;

        let delete = conn
            .execute_query(&CompiledQuery::new(
                "DELETE FROM kv WHERE key = ?",
                vec![Value::Text("missing".into())],
            ))
            .await?;
        // Zero rows written means the count is absent, not Some(0).
        assert_eq!(delete.num_affected_rows, None);
        assert!(delete.rows.is_empty());

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn empty_select_and_repeatable_reads() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dialect = kv_dialect()?;
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;

        let empty = conn
            .execute_query(&CompiledQuery::new(
                "SELECT value FROM kv WHERE key = ?",
                vec![Value::Text("nope".into())],
            ))
            .await?;
        assert!(empty.is_empty());
        assert_eq!(empty.num_affected_rows, None);

        for (key, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
            conn.execute_query(&CompiledQuery::new(
                "INSERT INTO kv (key, value) VALUES (?, ?)",
                vec![Value::Text(key.into()), Value::Text(value.into())],
            ))
            .await?;
        }

        let query = CompiledQuery::new_without_params("SELECT key, value FROM kv ORDER BY key");
        let first = conn.execute_query(&query).await?;
        let second = conn.execute_query(&query).await?;

        assert_eq!(first.rows.len(), 3);
        assert_eq!(first.rows.len(), second.rows.len());
        for (a, b) in first.rows.iter().zip(second.rows.iter()) {
            assert_eq!(a.values(), b.values());
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn bulk_update_counts_every_row() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dialect = kv_dialect()?;
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;

        for i in 0..25 {
            conn.execute_query(&CompiledQuery::new(
                "INSERT INTO kv (key, value) VALUES (?, ?)",
                vec![Value::Text(format!("k{i}")), Value::Text("old".into())],
            ))
            .await?;
        }

        let update = conn
            .execute_query(&CompiledQuery::new(
                "UPDATE kv SET value = ?",
                vec![Value::Text("new".into())],
            ))
            .await?;
        assert_eq!(update.num_affected_rows, Some(25));
        assert_eq!(update.insert_id, None);

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn file_backed_storage_persists_across_drivers() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("kv.db");

    rt.block_on(async {
        let storage = RusqliteStorage::open(&db_path)?;
        let dialect = EmbeddedDialect::new(DialectConfig::new(Arc::new(storage)));
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;
        conn.execute_query(&CompiledQuery::new(
            "INSERT INTO kv (key, value) VALUES (?, ?)",
            vec![Value::Text("persisted".into()), Value::Text("yes".into())],
        ))
        .await?;
        driver.release_connection(conn).await?;

        // New storage context over the same file sees the committed row.
        let storage = RusqliteStorage::open(&db_path)?;
        let dialect = EmbeddedDialect::new(DialectConfig::new(Arc::new(storage)));
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        let select = conn
            .execute_query(&CompiledQuery::new(
                "SELECT value FROM kv WHERE key = ?",
                vec![Value::Text("persisted".into())],
            ))
            .await?;
        assert_eq!(
            select.rows[0].get("value").and_then(Value::as_text),
            Some("yes")
        );

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn engine_errors_propagate_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dialect = kv_dialect()?;
        let driver = dialect.create_driver();
        let mut conn = driver.acquire_connection().await?;
        create_kv_table(&mut conn).await?;

        // Malformed SQL
        let err = conn
            .execute_query(&CompiledQuery::new_without_params("SELEC oops"))
            .await
            .unwrap_err();
        assert!(matches!(err, DialectError::Storage(_)));
        assert!(err.to_string().contains("syntax error"), "{err}");

        // Constraint violation
        conn.execute_query(&CompiledQuery::new(
            "INSERT INTO kv (key, value) VALUES (?, ?)",
            vec![Value::Text("dup".into()), Value::Text("1".into())],
        ))
        .await?;
        let err = conn
            .execute_query(&CompiledQuery::new(
                "INSERT INTO kv (key, value) VALUES (?, ?)",
                vec![Value::Text("dup".into()), Value::Text("2".into())],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DialectError::Storage(_)));
        assert!(err.to_string().to_lowercase().contains("unique"), "{err}");

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
