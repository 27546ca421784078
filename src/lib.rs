//! Magazine Subscriptions - article catalog and PortOne recurring billing.
//!
//! A `Paid` notification from PortOne opens a 30-day billing period, records
//! the charge in an append-only ledger and registers the next charge at the
//! gateway. A `Cancelled` notification records the reversal and removes the
//! pending charge.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
