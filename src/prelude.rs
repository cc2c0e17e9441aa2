//! Prelude module for common layerdeck types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use layerdeck::prelude::*;`

pub use crate::core::{
    extent::{Extent, ExtentAccumulator},
    geo::Point,
};

pub use crate::data::geojson::{
    FeatureStyle, GeoJson, GeoJsonFeature, GeoJsonGeometry, StyleFunction,
};

pub use crate::layers::{
    loaded::{LoadedLayer, StyleState},
    source::{FeatureSource, SourceState},
    stack::LayerStack,
};

pub use crate::service::{
    client::ServiceClient,
    description::{LayerDescriptor, LayerId, LayerMeta, ServiceDescription},
};

pub use crate::orchestrate::{LayerOrchestrator, LayerOutcome, RefreshOptions, RefreshReport};

pub use crate::ui::{
    inspector::{FeatureInspector, InspectorContent, MapClick, PanelPosition},
    legend::{LegendRow, LegendView},
};

pub use crate::traits::{
    FeatureService, FitOptions, InspectorPort, LegendPort, MapSurface, StyleResolver,
};

pub use crate::{Result, ViewerError};
