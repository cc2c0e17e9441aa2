//! # Layerdeck
//!
//! The layer-lifecycle core of a feature-service map viewer.
//!
//! Layerdeck discovers a data-driven list of layers from a remote service
//! description, loads each layer concurrently while resolving its style from
//! a separate endpoint, keeps a legend synchronized with the resulting layer
//! stack, and answers click-to-inspect requests for rendered features.
//! Rendering and DOM work stay outside the crate behind capability traits
//! (see [`traits`]), so the orchestration logic is testable against fakes.

pub mod core;
pub mod data;
pub mod layers;
pub mod orchestrate;
pub mod prelude;
pub mod service;
pub mod traits;
pub mod ui;

// Re-export public API
pub use crate::core::{
    extent::{Extent, ExtentAccumulator},
    geo::Point,
};

pub use layers::{
    loaded::{LoadedLayer, StyleState},
    source::{FeatureSource, SourceState},
    stack::LayerStack,
};

pub use service::{
    client::ServiceClient,
    description::{LayerDescriptor, LayerId, LayerMeta, ServiceDescription},
};

pub use orchestrate::{
    loader::LayerOutcome,
    orchestrator::{LayerOrchestrator, RefreshOptions, RefreshReport},
};

pub use ui::{
    inspector::{FeatureInspector, InspectorContent, MapClick, PanelPosition},
    legend::{LegendRow, LegendView},
};

pub use data::geojson::{FeatureStyle, GeoJson, GeoJsonFeature, StyleFunction};

pub use traits::{
    FeatureService, FitOptions, InspectorPort, LegendPort, MapSurface, StyleResolver,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The service description could not be fetched or parsed. Aborts the
    /// refresh; the base map stays usable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A single layer's style endpoint failed. Non-fatal: the layer stays in
    /// the stack unstyled.
    #[error("style resolution failed for layer {layer_id}: {reason}")]
    StyleResolutionFailed {
        layer_id: service::description::LayerId,
        reason: String,
    },

    /// A single layer's feature query failed. Non-fatal: the layer stays in
    /// the stack with an empty source.
    #[error("feature query failed for layer {layer_id}: {reason}")]
    FeatureQueryFailed {
        layer_id: service::description::LayerId,
        reason: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = ViewerError;
