use crate::layers::loaded::LoadedLayer;
use crate::service::description::LayerId;

/// The map's layer stack: a fixed base layer at index 0 that a refresh never
/// removes, plus the overlay layers of the current cycle in descriptor order.
///
/// Overlay order is fixed at append time, so overlay index `i` (stack index
/// `i + 1`) always corresponds to descriptor index `i` regardless of which
/// layer's network calls complete first.
#[derive(Debug)]
pub struct LayerStack {
    base_name: String,
    overlays: Vec<LoadedLayer>,
}

impl LayerStack {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            overlays: Vec::new(),
        }
    }

    /// Display name of the always-present background layer
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Removes every layer except the base. The destructive reset at the
    /// start of a refresh cycle.
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    /// Appends an overlay above everything already in the stack
    pub fn push(&mut self, layer: LoadedLayer) {
        self.overlays.push(layer);
    }

    /// Total stack height including the base layer
    pub fn len(&self) -> usize {
        self.overlays.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false // the base layer is always present
    }

    pub fn overlays(&self) -> &[LoadedLayer] {
        &self.overlays
    }

    /// Overlay at stack index `index` (index 0 is the base layer)
    pub fn overlay_at(&self, index: usize) -> Option<&LoadedLayer> {
        index.checked_sub(1).and_then(|i| self.overlays.get(i))
    }

    pub fn by_id(&self, id: LayerId) -> Option<&LoadedLayer> {
        self.overlays.iter().find(|l| l.id() == id)
    }

    pub fn by_id_mut(&mut self, id: LayerId) -> Option<&mut LoadedLayer> {
        self.overlays.iter_mut().find(|l| l.id() == id)
    }

    /// Applies a function to a specific overlay mutably
    pub fn with_layer_mut<F, R>(&mut self, id: LayerId, f: F) -> Option<R>
    where
        F: FnOnce(&mut LoadedLayer) -> R,
    {
        self.by_id_mut(id).map(f)
    }
}
