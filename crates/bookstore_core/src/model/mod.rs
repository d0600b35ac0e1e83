//! Bookstore record model.
//!
//! # Responsibility
//! - Define one plain record per table plus `New*` inputs without ids.
//! - Keep the purchase status a closed enumeration.
//!
//! # Invariants
//! - Relations are expressed as foreign-id fields only; records never hold
//!   references to each other.
//! - Ids are assigned by storage and never chosen by callers.

pub mod catalog;
pub mod customer;
pub mod purchase;
