use crate::core::geo::Point;
use crate::data::geojson::GeoJsonFeature;
use crate::traits::{InspectorPort, MapSurface};
use std::sync::Arc;

/// A single-click event on the rendered map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    /// Screen pixel of the click
    pub pixel: Point,
    /// Map coordinate under the click
    pub coordinate: Point,
}

/// Attribute rows of the inspected feature, geometry excluded
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InspectorContent {
    pub rows: Vec<(String, String)>,
}

impl InspectorContent {
    /// Extracts the feature's attribute mapping as key/value rows, in the
    /// feature's own attribute order. The geometry attribute is never
    /// displayed.
    pub fn from_feature(feature: &GeoJsonFeature) -> Self {
        let rows = feature
            .properties
            .iter()
            .flatten()
            .filter(|(key, _)| key.as_str() != "geometry")
            .map(|(key, value)| (key.clone(), display_value(value)))
            .collect();
        Self { rows }
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Panel anchor in screen coordinates: the panel's bottom-left corner sits
/// on the click point, so the panel appears above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    pub left: f64,
    pub bottom: f64,
}

/// Inspects the topmost rendered feature under a map click and drives the
/// inspection panel through an [`InspectorPort`].
///
/// Overlapping features below the topmost one are not enumerable through
/// this interface.
pub struct FeatureInspector {
    map: Arc<dyn MapSurface>,
    port: Box<dyn InspectorPort>,
}

impl FeatureInspector {
    pub fn new(map: Arc<dyn MapSurface>, port: Box<dyn InspectorPort>) -> Self {
        Self { map, port }
    }

    /// Handles one single-click event. With no feature beneath the click
    /// the panel is hidden; otherwise the topmost hit's attributes are
    /// shown anchored above the click point.
    pub fn on_single_click(&mut self, click: &MapClick) {
        let mut hits = self.map.features_at_pixel(click.pixel);
        if hits.is_empty() {
            self.port.hide();
            return;
        }
        let top = hits.remove(0);

        let content = InspectorContent::from_feature(&top);
        let anchor = self.map.pixel_from_coordinate(click.coordinate);
        self.port.show(
            content,
            PanelPosition {
                left: anchor.x,
                bottom: anchor.y,
            },
        );
    }
}
