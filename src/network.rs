//! Network URL constants for the CoinSim SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://jdwd40.com";
