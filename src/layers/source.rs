use crate::core::extent::Extent;
use crate::data::geojson::{features_extent, GeoJsonFeature};

/// Load state of a feature source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// The feature query is still in flight
    Loading,
    /// Features have arrived (possibly zero of them)
    Ready,
    /// The feature query failed; the source stays empty
    Failed,
}

/// Holds one layer's fetched geometry and attributes.
///
/// Mutable as features stream in: the source starts `Loading` while the
/// layer is already part of the stack, and flips to `Ready` or `Failed`
/// when its feature query completes.
#[derive(Debug)]
pub struct FeatureSource {
    query_url: String,
    state: SourceState,
    features: Vec<GeoJsonFeature>,
    extent: Extent,
}

impl FeatureSource {
    pub fn new(query_url: String) -> Self {
        Self {
            query_url,
            state: SourceState::Loading,
            features: Vec::new(),
            extent: Extent::empty(),
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn features(&self) -> &[GeoJsonFeature] {
        &self.features
    }

    /// Current extent of the loaded features. The empty sentinel until the
    /// first load completes, and permanently for a zero-feature layer.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Installs the result of a completed feature query
    pub fn set_features(&mut self, features: Vec<GeoJsonFeature>) {
        self.extent = features_extent(&features);
        self.features = features;
        self.state = SourceState::Ready;
    }

    /// Marks the feature query as failed, leaving the source empty
    pub fn set_failed(&mut self) {
        self.state = SourceState::Failed;
    }
}
