pub mod loader;
pub mod orchestrator;

pub use loader::LayerOutcome;
pub use orchestrator::{LayerOrchestrator, RefreshOptions, RefreshReport};
