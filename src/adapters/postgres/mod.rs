//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresLedgerStore` - Append-only `payment` ledger
//! - `PostgresMagazineRepository` - Article catalog in `magazine`

mod ledger_store;
mod magazine_repository;

pub use ledger_store::PostgresLedgerStore;
pub use magazine_repository::PostgresMagazineRepository;
