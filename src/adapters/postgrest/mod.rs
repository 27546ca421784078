//! PostgREST adapters.
//!
//! Persistence over a hosted PostgREST endpoint (URL plus access key),
//! for deployments without direct database access.

mod client;
mod ledger_store;
mod magazine_repository;

pub use client::{PostgrestClient, PostgrestConfig};
pub use ledger_store::PostgrestLedgerStore;
pub use magazine_repository::PostgrestMagazineRepository;
