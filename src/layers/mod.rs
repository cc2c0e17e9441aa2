pub mod loaded;
pub mod source;
pub mod stack;

pub use loaded::{LoadedLayer, StyleState};
pub use source::{FeatureSource, SourceState};
pub use stack::LayerStack;
