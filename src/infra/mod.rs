//! Outside-world adapters: where the ship list comes from.

pub mod catalog;

pub use catalog::{default_sources, CatalogError, CatalogLoader, CatalogSource};
