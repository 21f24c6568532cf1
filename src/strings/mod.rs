//! # Strings Module
//!
//! Centralizes user-facing strings returned through the MCP tools.

pub mod messages;
