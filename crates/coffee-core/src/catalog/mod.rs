//! Write-once cache of the router's full tool catalog

mod cache;

pub use cache::{CatalogLoad, ToolCatalog};
