//! Core storage layer for the bookstore order-tracking system.
//! The SQLite schema in `db::migrations` is the single source of truth for
//! data invariants; everything else reads and writes through it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{create_tables, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{Author, AuthorId, Book, BookId, Genre, GenreId, NewBook};
pub use model::customer::{City, CityId, Client, ClientId, NewCity, NewClient};
pub use model::purchase::{
    LineItemId, NewLineItem, NewPurchase, NewStepRecord, Purchase, PurchaseId, PurchaseLineItem,
    PurchaseStatus, PurchaseStepRecord, Step, StepId, StepRecordId,
};
pub use repo::catalog_repo::{BookListQuery, CatalogRepository, SqliteCatalogRepository};
pub use repo::customer_repo::{ClientFilter, CustomerRepository, SqliteCustomerRepository};
pub use repo::error::{ConstraintKind, RepoError, RepoResult};
pub use repo::purchase_repo::{PurchaseRepository, SqlitePurchaseRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
