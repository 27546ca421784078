//! Adapters - Implementations of port interfaces.
//!
//! - `portone` - PortOne V2 payment gateway (and its test double)
//! - `postgres` - Ledger and catalog over sqlx
//! - `postgrest` - Ledger and catalog over a PostgREST endpoint
//! - `memory` - In-process stores for development and tests
//! - `http` - axum routes

pub mod http;
pub mod memory;
pub mod portone;
pub mod postgres;
pub mod postgrest;
