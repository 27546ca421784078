//! In-memory adapters for tests and local development.
//!
//! # Security Note
//!
//! Nothing here is durable. Locks use `.expect()` and will panic if
//! poisoned, which is acceptable for tests and local runs only.

mod ledger_store;
mod magazine_repository;

pub use ledger_store::InMemoryLedgerStore;
pub use magazine_repository::InMemoryMagazineRepository;
