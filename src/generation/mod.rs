//! Generation pipeline: per-job client with demo fallback and the sequential
//! batch runner built on top of it.
pub mod batch;
pub mod generator;
pub mod models;

pub use batch::{BatchOrchestrator, BatchOutcome};
pub use generator::{Generator, SimulatedLatency};
pub use models::{GenerationOptions, GenerationResult, GenerationSpeed, ImageQuality, PromptJob};
