//! Magazine catalog handlers.

mod get_magazine;
mod list_magazines;
mod submit_magazine;

pub use get_magazine::{GetMagazineHandler, GetMagazineQuery};
pub use list_magazines::{ListMagazinesHandler, ListMagazinesQuery};
pub use submit_magazine::{SubmitMagazineCommand, SubmitMagazineHandler};
