//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Provide id- and foreign-id-keyed data access per aggregate.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repositories add no validation of their own; rows are accepted or
//!   rejected by schema constraints, surfaced as `RepoError::Constraint`.
//! - Mutations addressed by id return `NotFound` when no row matched.

pub mod catalog_repo;
pub mod customer_repo;
pub mod error;
pub mod purchase_repo;

use error::{RepoError, RepoResult};
use rusqlite::Connection;

/// Deletes one row by primary key, reporting `NotFound` for unknown ids.
///
/// `table` and `id_column` are trusted identifiers from this crate.
fn delete_by_id(
    conn: &Connection,
    table: &str,
    id_column: &str,
    entity: &'static str,
    id: i64,
) -> RepoResult<()> {
    let changed = conn.execute(&format!("DELETE FROM {table} WHERE {id_column} = ?1;"), [id])?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

fn limit_offset_sql(limit: Option<u32>, offset: u32) -> String {
    match limit {
        Some(limit) if offset > 0 => format!(" LIMIT {limit} OFFSET {offset}"),
        Some(limit) => format!(" LIMIT {limit}"),
        None if offset > 0 => format!(" LIMIT -1 OFFSET {offset}"),
        None => String::new(),
    }
}
