//! # Application Layer
//!
//! Lookup orchestration for both tools, plus logging setup.

pub mod ip2location;
pub mod logging;
pub mod lookup;
