//! HTTP networking module
//!
//! Provides the pooled HTTP client used to reach search backends.

mod client;

pub use client::HttpClient;
