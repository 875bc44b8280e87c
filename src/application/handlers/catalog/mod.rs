//! Category and tag handlers.
//!
//! Listing is public; creating and deleting need the matching manage
//! capability. Anything still assigned to an event cannot be deleted.

mod categories;
mod tags;

pub use categories::{CategoryHandler, CreateCategoryCommand, DeleteCategoryCommand};
pub use tags::{CreateTagCommand, DeleteTagCommand, TagHandler};
