/// Vendor SDK client
///
/// Thin HTTP wrapper over the Summer/Armada backend. Every call is a plain
/// request/response round trip: no retries, no caching, typed responses.
pub mod client;
pub mod types;

pub use client::SdkClient;
pub use types::*;
