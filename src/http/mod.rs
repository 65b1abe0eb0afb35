//! HTTP client layer — `CoinsimHttp`, one method per API endpoint.

pub mod client;

pub use client::CoinsimHttp;
