//! # Interface Layer
//!
//! Entry points exposed to the MCP runtime.

pub mod mcp;
