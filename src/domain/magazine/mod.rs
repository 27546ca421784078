//! Magazine catalog domain.

mod article;

pub use article::{Magazine, NewMagazine, MAX_LIST_LIMIT, DEFAULT_LIST_LIMIT};
