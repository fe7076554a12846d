/// Armada playground backend library
///
/// API proxy in front of the vendor vault SDK plus the pieces a client needs
/// to drive multi-step on-chain flows: cross-chain bundle building and a
/// sequential transaction step executor.
pub mod arguments;
pub mod chains;
pub mod config;
pub mod cross_chain;
pub mod enso;
pub mod errors;
pub mod executor;
pub mod formatters;
pub mod logger;
pub mod rewards;
pub mod sdk;
pub mod types;
pub mod webserver;
