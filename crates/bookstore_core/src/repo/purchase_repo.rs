//! Purchase repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `purchases`, `steps`, `purchase_line_items` and
//!   `purchase_step_records`.
//! - Lookups keyed by client id and purchase id.
//!
//! # Invariants
//! - `(purchase_id, book_id)` and `(purchase_id, step_id)` pairs are unique;
//!   duplicates surface as `ConstraintKind::Unique`.
//! - Persisted step statuses outside the closed set are reported as
//!   `InvalidData`, never coerced.

use super::delete_by_id;
use super::error::{ensure_connection_ready, RepoError, RepoResult};
use crate::db::schema::{PURCHASES, PURCHASE_LINE_ITEMS, PURCHASE_STEP_RECORDS, STEPS};
use crate::model::customer::ClientId;
use crate::model::purchase::{
    LineItemId, NewLineItem, NewPurchase, NewStepRecord, Purchase, PurchaseId, PurchaseLineItem,
    PurchaseStatus, PurchaseStepRecord, Step, StepId, StepRecordId,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for purchases and their fulfillment data.
pub trait PurchaseRepository {
    fn create_purchase(&self, purchase: &NewPurchase) -> RepoResult<PurchaseId>;
    fn get_purchase(&self, id: PurchaseId) -> RepoResult<Option<Purchase>>;
    fn list_purchases_for_client(&self, client_id: ClientId) -> RepoResult<Vec<Purchase>>;
    fn delete_purchase(&self, id: PurchaseId) -> RepoResult<()>;

    fn add_line_item(&self, item: &NewLineItem) -> RepoResult<LineItemId>;
    fn list_line_items(&self, purchase_id: PurchaseId) -> RepoResult<Vec<PurchaseLineItem>>;
    fn update_line_item_quantity(&self, id: LineItemId, quantity: i64) -> RepoResult<()>;
    fn delete_line_item(&self, id: LineItemId) -> RepoResult<()>;

    fn create_step(&self, status: PurchaseStatus) -> RepoResult<StepId>;
    fn get_step(&self, id: StepId) -> RepoResult<Option<Step>>;
    fn list_steps(&self) -> RepoResult<Vec<Step>>;
    fn delete_step(&self, id: StepId) -> RepoResult<()>;

    fn add_step_record(&self, record: &NewStepRecord) -> RepoResult<StepRecordId>;
    /// Lists step records of one purchase ordered by start time.
    fn list_step_records(&self, purchase_id: PurchaseId) -> RepoResult<Vec<PurchaseStepRecord>>;
    fn delete_step_record(&self, id: StepRecordId) -> RepoResult<()>;
}

/// SQLite-backed purchase repository.
pub struct SqlitePurchaseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePurchaseRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[PURCHASES, STEPS, PURCHASE_LINE_ITEMS, PURCHASE_STEP_RECORDS],
        )?;
        Ok(Self { conn })
    }
}

impl PurchaseRepository for SqlitePurchaseRepository<'_> {
    fn create_purchase(&self, purchase: &NewPurchase) -> RepoResult<PurchaseId> {
        self.conn.execute(
            "INSERT INTO purchases (description, client_id) VALUES (?1, ?2);",
            params![purchase.description.as_str(), purchase.client_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_purchase(&self, id: PurchaseId) -> RepoResult<Option<Purchase>> {
        let mut stmt = self.conn.prepare(
            "SELECT purchase_id, description, client_id
             FROM purchases
             WHERE purchase_id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_purchase_row(row)?));
        }
        Ok(None)
    }

    fn list_purchases_for_client(&self, client_id: ClientId) -> RepoResult<Vec<Purchase>> {
        let mut stmt = self.conn.prepare(
            "SELECT purchase_id, description, client_id
             FROM purchases
             WHERE client_id = ?1
             ORDER BY purchase_id ASC;",
        )?;
        let mut rows = stmt.query([client_id])?;
        let mut purchases = Vec::new();
        while let Some(row) = rows.next()? {
            purchases.push(parse_purchase_row(row)?);
        }
        Ok(purchases)
    }

    fn delete_purchase(&self, id: PurchaseId) -> RepoResult<()> {
        delete_by_id(self.conn, PURCHASES, "purchase_id", "purchase", id)
    }

    fn add_line_item(&self, item: &NewLineItem) -> RepoResult<LineItemId> {
        self.conn.execute(
            "INSERT INTO purchase_line_items (purchase_id, book_id, quantity)
             VALUES (?1, ?2, ?3);",
            params![item.purchase_id, item.book_id, item.quantity],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_line_items(&self, purchase_id: PurchaseId) -> RepoResult<Vec<PurchaseLineItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT line_item_id, purchase_id, book_id, quantity
             FROM purchase_line_items
             WHERE purchase_id = ?1
             ORDER BY line_item_id ASC;",
        )?;
        let mut rows = stmt.query([purchase_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(PurchaseLineItem {
                id: row.get("line_item_id")?,
                purchase_id: row.get("purchase_id")?,
                book_id: row.get("book_id")?,
                quantity: row.get("quantity")?,
            });
        }
        Ok(items)
    }

    fn update_line_item_quantity(&self, id: LineItemId, quantity: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE purchase_line_items SET quantity = ?2 WHERE line_item_id = ?1;",
            params![id, quantity],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "line item",
                id,
            });
        }
        Ok(())
    }

    fn delete_line_item(&self, id: LineItemId) -> RepoResult<()> {
        delete_by_id(self.conn, PURCHASE_LINE_ITEMS, "line_item_id", "line item", id)
    }

    fn create_step(&self, status: PurchaseStatus) -> RepoResult<StepId> {
        self.conn.execute(
            "INSERT INTO steps (status) VALUES (?1);",
            [status.as_db_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_step(&self, id: StepId) -> RepoResult<Option<Step>> {
        let mut stmt = self
            .conn
            .prepare("SELECT step_id, status FROM steps WHERE step_id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_step_row(row)?));
        }
        Ok(None)
    }

    fn list_steps(&self) -> RepoResult<Vec<Step>> {
        let mut stmt = self
            .conn
            .prepare("SELECT step_id, status FROM steps ORDER BY step_id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut steps = Vec::new();
        while let Some(row) = rows.next()? {
            steps.push(parse_step_row(row)?);
        }
        Ok(steps)
    }

    fn delete_step(&self, id: StepId) -> RepoResult<()> {
        delete_by_id(self.conn, STEPS, "step_id", "step", id)
    }

    fn add_step_record(&self, record: &NewStepRecord) -> RepoResult<StepRecordId> {
        self.conn.execute(
            "INSERT INTO purchase_step_records (
                purchase_id,
                step_id,
                start_timestamp,
                end_timestamp
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                record.purchase_id,
                record.step_id,
                record.start_timestamp,
                record.end_timestamp,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_step_records(&self, purchase_id: PurchaseId) -> RepoResult<Vec<PurchaseStepRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                step_record_id,
                purchase_id,
                step_id,
                start_timestamp,
                end_timestamp
             FROM purchase_step_records
             WHERE purchase_id = ?1
             ORDER BY start_timestamp ASC, step_record_id ASC;",
        )?;
        let mut rows = stmt.query([purchase_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(PurchaseStepRecord {
                id: row.get("step_record_id")?,
                purchase_id: row.get("purchase_id")?,
                step_id: row.get("step_id")?,
                start_timestamp: row.get("start_timestamp")?,
                end_timestamp: row.get("end_timestamp")?,
            });
        }
        Ok(records)
    }

    fn delete_step_record(&self, id: StepRecordId) -> RepoResult<()> {
        delete_by_id(
            self.conn,
            PURCHASE_STEP_RECORDS,
            "step_record_id",
            "step record",
            id,
        )
    }
}

fn parse_purchase_row(row: &Row<'_>) -> RepoResult<Purchase> {
    Ok(Purchase {
        id: row.get("purchase_id")?,
        description: row.get("description")?,
        client_id: row.get("client_id")?,
    })
}

fn parse_step_row(row: &Row<'_>) -> RepoResult<Step> {
    let status_text: String = row.get("status")?;
    let status = PurchaseStatus::parse_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid step status `{status_text}` in steps.status"))
    })?;
    Ok(Step {
        id: row.get("step_id")?,
        status,
    })
}
