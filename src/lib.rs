pub mod cli;
pub mod client;
pub mod core;
pub mod games;
pub mod telemetry;

// Re-export for convenience
pub use crate::core::game::{Context, Game};
