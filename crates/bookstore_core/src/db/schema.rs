//! Table catalog and schema introspection helpers.
//!
//! # Responsibility
//! - Name every table the migrations declare.
//! - Answer "which of them exist" questions against a live connection.

use super::DbResult;
use rusqlite::Connection;

pub const AUTHORS: &str = "authors";
pub const GENRES: &str = "genres";
pub const BOOKS: &str = "books";
pub const CITIES: &str = "cities";
pub const CLIENTS: &str = "clients";
pub const PURCHASES: &str = "purchases";
pub const STEPS: &str = "steps";
pub const PURCHASE_LINE_ITEMS: &str = "purchase_line_items";
pub const PURCHASE_STEP_RECORDS: &str = "purchase_step_records";

/// Every table created by the migrations, in dependency order.
pub const TABLES: [&str; 9] = [
    AUTHORS,
    GENRES,
    BOOKS,
    CITIES,
    CLIENTS,
    PURCHASES,
    STEPS,
    PURCHASE_LINE_ITEMS,
    PURCHASE_STEP_RECORDS,
];

/// Lists user tables present in the database, sorted by name.
///
/// SQLite internals (`sqlite_sequence` and friends) are excluded.
pub fn list_tables(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name
         FROM sqlite_master
         WHERE type = 'table'
           AND name NOT LIKE 'sqlite_%'
         ORDER BY name ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut names = Vec::new();
    while let Some(row) = rows.next()? {
        names.push(row.get(0)?);
    }
    Ok(names)
}

/// Returns whether `table` exists in the connected database.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether foreign key enforcement is active on this connection.
pub fn foreign_keys_enabled(conn: &Connection) -> DbResult<bool> {
    let enabled: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    Ok(enabled == 1)
}
