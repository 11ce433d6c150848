//! Core services for the DIY tool servers.
//!
//! This crate owns the keyword relevance search shared by every static
//! collection, the building-code database, the multi-supplier product
//! catalog, and the material-quantity calculators.

pub mod calculators;
pub mod codes;
pub mod error;
pub mod products;
pub mod search;

pub use codes::{CodeDatabase, CodeQuery};
pub use error::{CatalogError, CatalogResult, LoadError};
pub use products::{ProductCatalog, ProductQuery, ProductSource, StaticProductSource};
