//! SQLite-backed record store.
//!
//! # Responsibility
//! - Map `RecordStore` calls onto parameterized single-table statements.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every mutating call runs in its own transaction; an early return drops
//!   the transaction, which rolls it back.
//! - Updates write only the patched columns plus the timestamp column.
//! - Read paths reject invalid persisted state instead of masking it.

mod category;
mod inventory;
mod product;

use crate::db::migrations::{current_version, latest_version};
use crate::model::record::{Patch, Record, RecordId, ResourceKind};
use crate::model::timestamp::{now_utc, parse_db_text, to_db_text, Timestamp};
use crate::repo::store::{RecordStore, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, Connection, ErrorCode, Row};
use std::marker::PhantomData;
use uuid::Uuid;

/// Table mapping for a record type.
pub trait SqlRecord: Record + Sized {
    const TABLE: &'static str;
    /// Columns in the order produced by `to_values`; the key comes first.
    const COLUMNS: &'static [&'static str];
    /// Column holding the update timestamp.
    const TOUCH_COLUMN: &'static str;

    fn to_values(&self) -> Vec<Value>;

    fn touch_value(&self) -> Value;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// `(sql fragment, bind value)` pairs; each fragment has one `?`.
    fn filter_clauses(filter: &Self::Filter) -> Vec<(&'static str, Value)>;

    /// Column assignments for the fields present in `patch`, with values
    /// taken from the already merged record.
    fn patch_assignments(patch: &Self::Patch, merged: &Self) -> Vec<(&'static str, Value)>;

    fn key_column() -> &'static str {
        Self::COLUMNS[0]
    }
}

/// Record store over one SQLite table, borrowing a migrated connection.
pub struct SqliteStore<'conn, R> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: SqlRecord> SqliteStore<'conn, R> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `SchemaNotReady` when the connection schema is not at the latest
    ///   migration version.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }
}

impl<R: SqlRecord> RecordStore<R> for SqliteStore<'_, R> {
    fn insert(&mut self, record: R) -> RepoResult<R> {
        record.validate()?;

        let placeholders = (1..=R::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            R::TABLE,
            R::COLUMNS.join(", ")
        );

        let tx = self.conn.unchecked_transaction()?;
        if let Err(err) = tx.execute(&sql, params_from_iter(record.to_values())) {
            if is_key_conflict(&err) {
                return Err(RepoError::Conflict {
                    resource: R::KIND,
                    id: record.id(),
                });
            }
            return Err(err.into());
        }
        tx.commit()?;

        Ok(record)
    }

    fn select_all(&self, filter: &R::Filter) -> RepoResult<Vec<R>> {
        let mut sql = format!("{} WHERE 1 = 1", Self::select_sql());
        let mut bind_values: Vec<Value> = Vec::new();

        for (fragment, value) in R::filter_clauses(filter) {
            sql.push_str(" AND ");
            sql.push_str(fragment);
            bind_values.push(value);
        }
        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(load_row::<R>(row)?);
        }

        Ok(records)
    }

    fn select_by_key(&self, id: RecordId) -> RepoResult<R> {
        fetch_by_key::<R>(self.conn, id)?.ok_or_else(|| RepoError::not_found::<R>(id))
    }

    fn update_by_key(&mut self, id: RecordId, patch: &R::Patch) -> RepoResult<R> {
        if patch.is_empty() {
            return Err(RepoError::EmptyUpdate { resource: R::KIND });
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut merged =
            fetch_by_key::<R>(&tx, id)?.ok_or_else(|| RepoError::not_found::<R>(id))?;
        merged.apply_patch(patch);
        merged.touch(now_utc());
        merged.validate()?;

        let mut assignments = R::patch_assignments(patch, &merged);
        assignments.push((R::TOUCH_COLUMN, merged.touch_value()));

        let set_clause = assignments
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {set_clause} WHERE {} = ?{};",
            R::TABLE,
            R::key_column(),
            assignments.len() + 1
        );

        let mut bind_values: Vec<Value> = assignments.into_iter().map(|(_, value)| value).collect();
        bind_values.push(id_value(id));

        let changed = tx.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::not_found::<R>(id));
        }

        // Read back inside the same transaction so the caller sees exactly
        // what was committed.
        let stored = fetch_by_key::<R>(&tx, id)?.ok_or_else(|| RepoError::InvalidData {
            resource: R::KIND,
            message: format!("row {id} vanished during update"),
        })?;
        tx.commit()?;

        Ok(stored)
    }

    fn delete_by_key(&mut self, id: RecordId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            &format!("DELETE FROM {} WHERE {} = ?1;", R::TABLE, R::key_column()),
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found::<R>(id));
        }
        tx.commit()?;

        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let found = current_version(conn)?;
    let expected = latest_version();
    if found != expected {
        return Err(RepoError::SchemaNotReady { found, expected });
    }
    Ok(())
}

fn fetch_by_key<R: SqlRecord>(conn: &Connection, id: RecordId) -> RepoResult<Option<R>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} WHERE {} = ?1;",
        R::COLUMNS.join(", "),
        R::TABLE,
        R::key_column()
    ))?;

    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(load_row::<R>(row)?));
    }

    Ok(None)
}

fn load_row<R: SqlRecord>(row: &Row<'_>) -> RepoResult<R> {
    let record = R::from_row(row)?;
    record.validate().map_err(|err| RepoError::InvalidData {
        resource: R::KIND,
        message: err.to_string(),
    })?;
    Ok(record)
}

fn is_key_conflict(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                )
        }
        _ => false,
    }
}

pub(crate) fn id_value(id: RecordId) -> Value {
    Value::Text(id.to_string())
}

pub(crate) fn optional_id_value(id: Option<RecordId>) -> Value {
    id.map_or(Value::Null, id_value)
}

pub(crate) fn optional_text_value(text: Option<&str>) -> Value {
    text.map_or(Value::Null, |text| Value::Text(text.to_string()))
}

pub(crate) fn timestamp_value(value: &Timestamp) -> Value {
    Value::Text(to_db_text(value))
}

pub(crate) fn parse_id(
    row: &Row<'_>,
    column: &str,
    resource: ResourceKind,
) -> RepoResult<RecordId> {
    let text: String = row.get(column)?;
    parse_uuid_text(&text, column, resource)
}

pub(crate) fn parse_optional_id(
    row: &Row<'_>,
    column: &str,
    resource: ResourceKind,
) -> RepoResult<Option<RecordId>> {
    row.get::<_, Option<String>>(column)?
        .map(|text| parse_uuid_text(&text, column, resource))
        .transpose()
}

pub(crate) fn parse_timestamp(
    row: &Row<'_>,
    column: &str,
    resource: ResourceKind,
) -> RepoResult<Timestamp> {
    let text: String = row.get(column)?;
    parse_db_text(&text).ok_or_else(|| RepoError::InvalidData {
        resource,
        message: format!("invalid timestamp `{text}` in {column}"),
    })
}

fn parse_uuid_text(text: &str, column: &str, resource: ResourceKind) -> RepoResult<RecordId> {
    Uuid::parse_str(text).map_err(|_| RepoError::InvalidData {
        resource,
        message: format!("invalid uuid `{text}` in {column}"),
    })
}
