/// Bundler (Enso) client
///
/// Submits ordered action lists to the routing API and relays the resulting
/// calldata back verbatim. The playground never interprets the returned
/// route - it is passed straight through to the caller's wallet.
pub mod client;
pub mod types;

pub use client::{EnsoClient, EnsoError};
pub use types::*;
