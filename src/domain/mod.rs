//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `billing` - Subscription billing periods, ledger rows, webhook outcomes
//! - `magazine` - Article catalog

pub mod billing;
pub mod foundation;
pub mod magazine;
