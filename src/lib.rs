//! Seedream scene proxy library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the server binary.
//! - `seedream`: Thin client for the Seedream image API plus the startup probe.
//! - `prompt`: Free-form prompt parsing, product scene templates, series catalog.
//! - `generation`: Per-job generator with demo fallback and the batch runner.
//! - `utils`: Inline image (data URL) helpers.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `SeedreamClient`,
//! `Generator`, `BatchOrchestrator` and `ApiMode`.
pub mod api;
pub mod config;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod seedream;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use generation::{BatchOrchestrator, Generator};
pub use seedream::{ApiMode, SeedreamClient};
