//! Axum HTTP adapter: state, router and request handlers.
pub mod extract;
pub mod handlers;
pub mod routes;

pub use routes::{router, AppState};
