//! Capability traits shared across the crate.
//!
//! The orchestration core never touches the network-facing map renderer or
//! the DOM directly; everything outward goes through these seams so the
//! logic can run against fakes in tests.

use crate::core::{extent::Extent, geo::Point};
use crate::data::geojson::{GeoJson, GeoJsonFeature, StyleFunction};
use crate::service::description::{LayerId, ServiceDescription};
use crate::ui::inspector::{InspectorContent, PanelPosition};
use crate::ui::legend::LegendRow;
use crate::Result;
use async_trait::async_trait;

/// Remote feature-service access: the description document and per-layer
/// feature queries. Production implementation is [`crate::ServiceClient`].
#[async_trait]
pub trait FeatureService: Send + Sync {
    /// Fetches and parses `GET {service_url}?f=json`. Any network or parse
    /// failure surfaces as [`crate::ViewerError::ServiceUnavailable`].
    async fn fetch_description(&self, service_url: &str) -> Result<ServiceDescription>;

    /// Fetches one layer's features from its resolved query endpoint
    async fn fetch_features(&self, query_url: &str) -> Result<GeoJson>;
}

/// External style-function resolution service, consumed opaquely: the core
/// does not know its wire format.
#[async_trait]
pub trait StyleResolver: Send + Sync {
    async fn resolve(&self, style_url: &str, projection: &str) -> Result<StyleFunction>;
}

/// Options for fitting the map view to an extent
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub duration_ms: u64,
    /// Padding in pixels: top, right, bottom, left
    pub padding: [f64; 4],
    /// Snap to the nearest integer zoom level
    pub nearest: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            padding: [50.0, 50.0, 50.0, 50.0],
            nearest: false,
        }
    }
}

/// The rendered map's capability surface: view fitting, hit testing and
/// coordinate conversion. Owned by the embedding application.
pub trait MapSurface: Send + Sync {
    /// Projection code of the map view, handed to the style resolver
    fn projection(&self) -> String;

    /// Animates the view to show the given extent
    fn fit_view(&self, extent: &Extent, options: &FitOptions);

    /// Rendered features under a screen pixel, topmost first
    fn features_at_pixel(&self, pixel: Point) -> Vec<GeoJsonFeature>;

    /// Converts a map coordinate to a screen pixel
    fn pixel_from_coordinate(&self, coordinate: Point) -> Point;
}

/// Legend rendering surface. The core tells it what rows exist and what
/// their check state is; it owns the actual widgets.
pub trait LegendPort: Send + Sync {
    /// Removes every rendered row
    fn clear(&mut self);

    /// Appends one row; called in descriptor order during a rebuild
    fn push_row(&mut self, row: &LegendRow);

    /// Mirrors a visibility change back onto an existing row's checkbox
    fn set_checked(&mut self, layer_id: LayerId, checked: bool);
}

/// Inspection-panel rendering surface.
pub trait InspectorPort: Send + Sync {
    /// Shows the panel with its bottom-left corner at `position` (the click
    /// point). Implementations convert their measured panel height into the
    /// top offset.
    fn show(&mut self, content: InspectorContent, position: PanelPosition);

    /// Hides the panel if it is showing
    fn hide(&mut self);
}
