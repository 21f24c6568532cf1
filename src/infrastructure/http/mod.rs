//! # HTTP Module
//!
//! reqwest-backed implementation of `HttpFetcher`.

pub mod client;

pub use client::ReqwestFetcher;
