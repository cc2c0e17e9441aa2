use crate::layers::stack::LayerStack;
use crate::service::description::{LayerDescriptor, LayerId};
use crate::traits::{FitOptions, LegendPort, MapSurface};

/// UI projection of one loaded layer. `checked` mirrors the layer's
/// visibility flag; the layer is the single source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub layer_id: LayerId,
    pub label: String,
    pub checked: bool,
}

/// Renders one legend row per loaded layer through a [`LegendPort`] and
/// routes row actions (visibility toggle, zoom-to-extent) back onto the
/// stack. Fully rebuilt on every refresh cycle.
pub struct LegendView {
    port: Box<dyn LegendPort>,
    rows: Vec<LegendRow>,
    fit_options: FitOptions,
}

impl LegendView {
    pub fn new(port: Box<dyn LegendPort>) -> Self {
        Self {
            port,
            rows: Vec::new(),
            fit_options: FitOptions {
                duration_ms: 1000,
                padding: [0.0, 0.0, 0.0, 0.0],
                nearest: true,
            },
        }
    }

    pub fn with_fit_options(mut self, fit_options: FitOptions) -> Self {
        self.fit_options = fit_options;
        self
    }

    pub fn rows(&self) -> &[LegendRow] {
        &self.rows
    }

    /// Removes every row, here and in the port
    pub fn clear(&mut self) {
        self.rows.clear();
        self.port.clear();
    }

    /// Rebuilds the legend from the completed descriptor+layer pairing.
    /// Row `i` describes the layer at stack index `i + 1`.
    pub fn rebuild(&mut self, descriptors: &[LayerDescriptor], stack: &LayerStack) {
        self.clear();
        for descriptor in descriptors {
            let checked = stack
                .by_id(descriptor.id)
                .map(|layer| layer.is_visible())
                .unwrap_or(descriptor.default_visibility);
            let row = LegendRow {
                layer_id: descriptor.id,
                label: descriptor.name.clone(),
                checked,
            };
            self.port.push_row(&row);
            self.rows.push(row);
        }
        log::info!("legend rebuilt with {} rows", self.rows.len());
    }

    /// Sets one layer's visibility from its row checkbox. No separate state
    /// is kept: the layer flag is mutated directly and the row mirrors it.
    pub fn toggle(&mut self, stack: &mut LayerStack, id: LayerId, checked: bool) {
        if stack.with_layer_mut(id, |layer| layer.set_visible(checked)).is_none() {
            log::warn!("toggle for unknown layer {}", id);
            return;
        }
        if let Some(row) = self.rows.iter_mut().find(|r| r.layer_id == id) {
            row.checked = checked;
        }
        self.port.set_checked(id, checked);
    }

    /// Fits the view to the layer's *current* source extent, read at call
    /// time rather than captured during load. No-op on the empty sentinel.
    pub fn zoom(&self, stack: &LayerStack, map: &dyn MapSurface, id: LayerId) {
        let Some(layer) = stack.by_id(id) else {
            log::warn!("zoom for unknown layer {}", id);
            return;
        };
        let extent = layer.source().extent();
        if extent.is_empty() {
            log::debug!("layer {} has no extent yet, skipping zoom", id);
            return;
        }
        map.fit_view(&extent, &self.fit_options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extent::Extent;
    use crate::core::geo::Point;
    use crate::data::geojson::{GeoJsonFeature, GeoJsonGeometry};
    use crate::layers::loaded::LoadedLayer;
    use crate::service::description::{LayerMeta, ServiceDescription};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct PortLog {
        clears: usize,
        rows: Vec<LegendRow>,
        checks: Vec<(LayerId, bool)>,
    }

    #[derive(Clone, Default)]
    struct FakeLegendPort(Arc<Mutex<PortLog>>);

    impl LegendPort for FakeLegendPort {
        fn clear(&mut self) {
            let mut log = self.0.lock().unwrap();
            log.clears += 1;
            log.rows.clear();
        }

        fn push_row(&mut self, row: &LegendRow) {
            self.0.lock().unwrap().rows.push(row.clone());
        }

        fn set_checked(&mut self, layer_id: LayerId, checked: bool) {
            self.0.lock().unwrap().checks.push((layer_id, checked));
        }
    }

    #[derive(Default)]
    struct FakeMap {
        fits: Mutex<Vec<Extent>>,
    }

    impl MapSurface for FakeMap {
        fn projection(&self) -> String {
            "EPSG:3857".to_string()
        }

        fn fit_view(&self, extent: &Extent, _options: &FitOptions) {
            self.fits.lock().unwrap().push(*extent);
        }

        fn features_at_pixel(&self, _pixel: Point) -> Vec<GeoJsonFeature> {
            Vec::new()
        }

        fn pixel_from_coordinate(&self, coordinate: Point) -> Point {
            coordinate
        }
    }

    fn fixture(ids: &[u32]) -> (Vec<LayerDescriptor>, LayerStack) {
        let description = ServiceDescription {
            layers: ids
                .iter()
                .map(|&id| LayerMeta {
                    id: LayerId(id),
                    name: format!("Layer {}", id),
                    default_visibility: true,
                })
                .collect(),
        };
        let descriptors = description.descriptors("http://example.com/f");
        let mut stack = LayerStack::new("base");
        for d in &descriptors {
            stack.push(LoadedLayer::new(d.clone()));
        }
        (descriptors, stack)
    }

    #[test]
    fn test_rebuild_renders_one_row_per_descriptor() {
        let log = FakeLegendPort::default();
        let mut legend = LegendView::new(Box::new(log.clone()));
        let (descriptors, stack) = fixture(&[4, 8, 2]);

        legend.rebuild(&descriptors, &stack);

        let state = log.0.lock().unwrap();
        assert_eq!(state.rows.len(), 3);
        assert_eq!(state.rows[0].label, "Layer 4");
        assert_eq!(state.rows[2].layer_id, LayerId(2));
        assert!(state.rows.iter().all(|r| r.checked));
        assert_eq!(legend.rows().len(), 3);
    }

    #[test]
    fn test_toggle_affects_only_target_layer() {
        let log = FakeLegendPort::default();
        let mut legend = LegendView::new(Box::new(log.clone()));
        let (descriptors, mut stack) = fixture(&[1, 2, 3]);
        legend.rebuild(&descriptors, &stack);

        legend.toggle(&mut stack, LayerId(2), false);

        assert!(!stack.by_id(LayerId(2)).unwrap().is_visible());
        assert!(stack.by_id(LayerId(1)).unwrap().is_visible());
        assert!(stack.by_id(LayerId(3)).unwrap().is_visible());
        assert_eq!(log.0.lock().unwrap().checks, vec![(LayerId(2), false)]);

        legend.toggle(&mut stack, LayerId(2), true);
        assert!(stack.by_id(LayerId(2)).unwrap().is_visible());
    }

    #[test]
    fn test_zoom_reads_current_extent() {
        let legend = LegendView::new(Box::new(FakeLegendPort::default()));
        let (_, mut stack) = fixture(&[1]);
        let map = FakeMap::default();

        // no features yet: empty extent, zoom must no-op
        legend.zoom(&stack, &map, LayerId(1));
        assert!(map.fits.lock().unwrap().is_empty());

        stack.with_layer_mut(LayerId(1), |layer| {
            layer.source_mut().set_features(vec![GeoJsonFeature {
                id: None,
                properties: None,
                geometry: Some(GeoJsonGeometry::Point {
                    coordinates: [3.0, 4.0],
                }),
            }]);
        });

        legend.zoom(&stack, &map, LayerId(1));
        let fits = map.fits.lock().unwrap();
        assert_eq!(fits.len(), 1);
        assert_eq!(fits[0], Extent::from_coords(3.0, 4.0, 3.0, 4.0));
    }

    #[test]
    fn test_rebuild_reflects_hidden_layers() {
        let log = FakeLegendPort::default();
        let mut legend = LegendView::new(Box::new(log.clone()));
        let (descriptors, mut stack) = fixture(&[1, 2]);
        stack.with_layer_mut(LayerId(2), |layer| layer.set_visible(false));

        legend.rebuild(&descriptors, &stack);

        let state = log.0.lock().unwrap();
        assert!(state.rows[0].checked);
        assert!(!state.rows[1].checked);
    }
}
