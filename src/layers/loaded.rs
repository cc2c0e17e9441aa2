use crate::data::geojson::StyleFunction;
use crate::layers::source::FeatureSource;
use crate::service::description::{LayerDescriptor, LayerId};

/// Resolution state of a layer's style.
///
/// Kept separate from the source's load state: a layer can be visible and
/// unstyled, or styled with no features yet.
#[derive(Clone, Default)]
pub enum StyleState {
    /// Style resolution still in flight
    #[default]
    Pending,
    /// Style function installed
    Resolved(StyleFunction),
    /// Style resolution failed; renderers fall back to the default style
    Failed,
}

impl std::fmt::Debug for StyleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleState::Pending => write!(f, "Pending"),
            StyleState::Resolved(_) => write!(f, "Resolved"),
            StyleState::Failed => write!(f, "Failed"),
        }
    }
}

/// The runtime pairing of a feature source and an asynchronously-resolved
/// style, owned exclusively by the [`crate::LayerStack`].
#[derive(Debug)]
pub struct LoadedLayer {
    descriptor: LayerDescriptor,
    visible: bool,
    source: FeatureSource,
    style: StyleState,
}

impl LoadedLayer {
    /// Constructs a still-loading layer from its descriptor. Visibility
    /// starts at the service's default.
    pub fn new(descriptor: LayerDescriptor) -> Self {
        let source = FeatureSource::new(descriptor.query_url.clone());
        Self {
            visible: descriptor.default_visibility,
            descriptor,
            source,
            style: StyleState::Pending,
        }
    }

    pub fn id(&self) -> LayerId {
        self.descriptor.id
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &LayerDescriptor {
        &self.descriptor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn source(&self) -> &FeatureSource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut FeatureSource {
        &mut self.source
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn set_style(&mut self, style: StyleFunction) {
        self.style = StyleState::Resolved(style);
    }

    pub fn set_style_failed(&mut self) {
        self.style = StyleState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn descriptor(id: u32, visible: bool) -> LayerDescriptor {
        let description = crate::service::description::ServiceDescription {
            layers: vec![crate::service::description::LayerMeta {
                id: LayerId(id),
                name: format!("layer-{}", id),
                default_visibility: visible,
            }],
        };
        description.descriptors("http://example.com/FeatureServer").remove(0)
    }

    #[test]
    fn test_new_layer_honors_default_visibility() {
        let visible = LoadedLayer::new(descriptor(0, true));
        let hidden = LoadedLayer::new(descriptor(1, false));

        assert!(visible.is_visible());
        assert!(!hidden.is_visible());
        assert!(matches!(visible.style(), StyleState::Pending));
    }

    #[test]
    fn test_style_transitions() {
        let mut layer = LoadedLayer::new(descriptor(0, true));
        layer.set_style(Arc::new(|_| crate::data::geojson::FeatureStyle::default()));
        assert!(matches!(layer.style(), StyleState::Resolved(_)));

        let mut failed = LoadedLayer::new(descriptor(1, true));
        failed.set_style_failed();
        assert!(matches!(failed.style(), StyleState::Failed));
    }

    #[test]
    fn test_visibility_toggle() {
        let mut layer = LoadedLayer::new(descriptor(0, true));
        layer.set_visible(false);
        assert!(!layer.is_visible());
        layer.set_visible(true);
        assert!(layer.is_visible());
    }
}
