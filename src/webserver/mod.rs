/// HTTP API server
///
/// Axum server exposing the playground endpoints. Every handler is a thin
/// validation layer in front of the SDK and bundler clients: check fields,
/// forward, map errors to the 400/500 contract.
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use server::{shutdown, start_server};
pub use state::AppState;
