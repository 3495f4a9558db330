use rusqlite::Connection;
use storefront_core::db::migrations::latest_version;
use storefront_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "products");
    assert_table_exists(&conn, "categories");
    assert_table_exists(&conn, "inventories");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "products");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn check_constraints_reject_out_of_range_rows() {
    let conn = open_db_in_memory().unwrap();

    let negative_price = conn.execute(
        "INSERT INTO products (product_id, name, price, created_at, updated_at)
         VALUES ('a', 'Widget', -1.0, 'now', 'now');",
        [],
    );
    assert!(negative_price.is_err());

    let negative_stock = conn.execute(
        "INSERT INTO inventories (inventory_id, product_id, stock_quantity, update_time, created_at)
         VALUES ('a', 'b', -5, 'now', 'now');",
        [],
    );
    assert!(negative_stock.is_err());
}

#[test]
fn category_name_filter_uses_nocase_index() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn
        .prepare(
            "EXPLAIN QUERY PLAN
             SELECT category_id FROM categories WHERE name = ?1 COLLATE NOCASE;",
        )
        .unwrap();
    let plan: Vec<String> = stmt
        .query_map(["tools"], |row| row.get::<_, String>(3))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert!(
        plan.iter().any(|detail| detail.contains("idx_categories_name")),
        "unexpected plan: {plan:?}"
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
