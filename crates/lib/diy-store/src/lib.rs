//! Record models and schema constants for the DIY tool servers.
//!
//! This crate defines the canonical record types shared by the search engine,
//! the code database, the product catalog, and the MCP tool layer.

pub mod models;
pub mod schema;

pub use models::*;
