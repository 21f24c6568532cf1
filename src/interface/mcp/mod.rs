//! # MCP Module
//!
//! rmcp server handlers for the two geolocation tools.

pub mod ip2locationio;
pub mod server;

pub use ip2locationio::Ip2LocationServer;
pub use server::GeolocationServer;
