use crate::core::{extent::Extent, geo::Point};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// GeoJSON geometry, tag-dispatched on `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and attribute properties. Properties keep
/// the document's own key order (`serde_json/preserve_order`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

impl GeoJson {
    /// Flattens the document into its features. A bare geometry becomes a
    /// single feature with no attributes.
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
            GeoJson::Geometry(geometry) => vec![GeoJsonFeature {
                id: None,
                geometry: Some(geometry),
                properties: None,
            }],
        }
    }
}

impl GeoJsonFeature {
    /// Bounding extent of the feature's geometry; empty when there is none
    pub fn extent(&self) -> Extent {
        self.geometry
            .as_ref()
            .map(|g| g.extent())
            .unwrap_or_else(Extent::empty)
    }
}

impl GeoJsonGeometry {
    /// Bounding extent of the geometry in map coordinates (x = first
    /// coordinate component, y = second)
    pub fn extent(&self) -> Extent {
        let mut extent = Extent::empty();
        self.extend_extent(&mut extent);
        extent
    }

    fn extend_extent(&self, extent: &mut Extent) {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                extent.extend_point(&Point::from(*coordinates));
            }
            GeoJsonGeometry::LineString { coordinates }
            | GeoJsonGeometry::MultiPoint { coordinates } => {
                for c in coordinates {
                    extent.extend_point(&Point::from(*c));
                }
            }
            GeoJsonGeometry::Polygon { coordinates }
            | GeoJsonGeometry::MultiLineString { coordinates } => {
                for ring in coordinates {
                    for c in ring {
                        extent.extend_point(&Point::from(*c));
                    }
                }
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        for c in ring {
                            extent.extend_point(&Point::from(*c));
                        }
                    }
                }
            }
            GeoJsonGeometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.extend_extent(extent);
                }
            }
        }
    }
}

/// Union extent over a slice of features
pub fn features_extent(features: &[GeoJsonFeature]) -> Extent {
    let mut extent = Extent::empty();
    for feature in features {
        extent.extend(&feature.extent());
    }
    extent
}

/// Rendering parameters a style function produces for one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub marker_color: Option<String>,
    pub marker_size: Option<String>,
    pub marker_symbol: Option<String>,
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self {
            stroke: Some("#3388ff".to_string()),
            stroke_width: Some(3.0),
            stroke_opacity: Some(1.0),
            fill: Some("#3388ff".to_string()),
            fill_opacity: Some(0.2),
            marker_color: Some("#3388ff".to_string()),
            marker_size: Some("medium".to_string()),
            marker_symbol: None,
        }
    }
}

/// A resolved style capability: maps a feature to rendering parameters
pub type StyleFunction = Arc<dyn Fn(&GeoJsonFeature) -> FeatureStyle + Send + Sync>;
