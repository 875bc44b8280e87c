//! Catalog domain - categories and tags used to classify events.

mod category;
mod errors;
mod tag;

pub use category::Category;
pub use errors::CatalogError;
pub use tag::Tag;
