//! Trait definitions for AnimaLineage operations.
//!
//! Each entity type implements the traits its endpoints support,
//! so `Elevage` gets the full CRUD set while `Race` is list-only.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use update::Update;
