//! Repository error taxonomy and connection readiness checks.
//!
//! # Responsibility
//! - Translate storage failures into semantic repository errors.
//! - Classify engine constraint violations so callers can tell a rejected
//!   row apart from a broken connection.
//! - Reject connections that were not bootstrapped through `db::open_db*`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::schema::{foreign_keys_enabled, table_exists};
use crate::db::DbError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

// SQLite extended result codes for SQLITE_CONSTRAINT (19).
const SQLITE_CONSTRAINT_CHECK: i32 = 275;
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
const SQLITE_CONSTRAINT_NOTNULL: i32 = 1299;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Category of a declarative constraint rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Check,
    Unique,
    ForeignKey,
    NotNull,
    Other,
}

impl ConstraintKind {
    fn from_extended_code(code: i32) -> Self {
        match code {
            SQLITE_CONSTRAINT_CHECK => Self::Check,
            SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => Self::Unique,
            SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
            SQLITE_CONSTRAINT_NOTNULL => Self::NotNull,
            _ => Self::Other,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not null",
            Self::Other => "other",
        }
    }
}

/// Error for bookstore persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A row was rejected by a schema constraint.
    Constraint {
        kind: ConstraintKind,
        message: String,
    },
    NotFound {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    ForeignKeysDisabled,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Constraint { kind, message } => {
                write!(f, "{} constraint violated: {message}", kind.as_str())
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::ForeignKeysDisabled => {
                write!(f, "foreign key enforcement is disabled on this connection")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(inner, _) = &value {
            if inner.code == ErrorCode::ConstraintViolation {
                return Self::Constraint {
                    kind: ConstraintKind::from_extended_code(inner.extended_code),
                    message: value.to_string(),
                };
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Returns the constraint category when this error is a rejected row.
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Constraint { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Verifies `conn` is migrated, enforces foreign keys and has `tables`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(*table));
        }
    }

    if !foreign_keys_enabled(conn)? {
        return Err(RepoError::ForeignKeysDisabled);
    }

    Ok(())
}
