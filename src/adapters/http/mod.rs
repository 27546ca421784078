//! HTTP adapters - REST API implementations.
//!
//! Each area has its own `dto`, `handlers` and `routes`; `router` mounts
//! them under `/api`.

pub mod billing;
pub mod magazine;
pub mod payments;
pub mod response;
pub mod router;
pub mod state;

pub use response::ErrorResponse;
pub use router::api_router;
pub use state::AppState;
