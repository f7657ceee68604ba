//! External image-generation API: wire types, HTTP client and startup probe.
pub mod client;
pub mod probe;
pub mod types;

pub use client::SeedreamClient;
pub use probe::{probe_api, resolve_mode, ApiMode};
pub use types::{ImageGenerationRequest, ImageGenerationResponse};
