//! MCP tool modules.
//!
//! Code lookup tools belong to `CodesMcp`. Product and calculator tools
//! belong to `MaterialsMcp`.

pub mod calculators;
pub mod codes;
pub mod products;
