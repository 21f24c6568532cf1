//! # ip2location MCP
//!
//! MCP tool servers over IP-geolocation HTTP APIs:
//! - Domain: Configuration, Types, Fetcher trait
//! - Infrastructure: reqwest HTTP client
//! - Application: Lookup services, Logging
//! - Interface: rmcp server handlers

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod strings;

#[cfg(test)]
pub(crate) mod testing;
