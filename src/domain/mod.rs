//! # Domain Layer
//!
//! Configuration, request/outcome types, and the fetcher trait.
//! Independent of the HTTP client and the MCP runtime.

pub mod config;
pub mod traits;
pub mod types;
