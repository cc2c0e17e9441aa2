use serde::{Deserialize, Serialize};

/// Stable identifier of one remote layer, as assigned by the service.
///
/// Every object derived from a layer carries this id, and all mutation paths
/// look layers up by it rather than by array position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u32);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One layer entry of the remote service description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMeta {
    pub id: LayerId,
    pub name: String,
    #[serde(default = "default_visibility")]
    pub default_visibility: bool,
}

fn default_visibility() -> bool {
    true
}

/// Remote service description, fetched as `GET {serviceUrl}?f=json`.
/// Immutable once fetched; one instance per refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescription {
    #[serde(default)]
    pub layers: Vec<LayerMeta>,
}

impl ServiceDescription {
    /// Derives the ordered descriptor list. Order is significant and is
    /// preserved end-to-end: service order, stack order, legend row order.
    pub fn descriptors(&self, service_url: &str) -> Vec<LayerDescriptor> {
        let base = service_url.trim_end_matches('/');
        self.layers
            .iter()
            .map(|meta| LayerDescriptor::resolve(base, meta))
            .collect()
    }
}

/// Resolved metadata for one remote feature layer, including its query and
/// style endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub name: String,
    pub default_visibility: bool,
    /// Absolute layer endpoint: `{serviceUrl}/{id}`
    pub layer_url: String,
    /// Feature query endpoint asking for all fields and GeoJSON geometry
    pub query_url: String,
    /// Per-layer style endpoint, consumed opaquely by the style resolver
    pub style_url: String,
}

impl LayerDescriptor {
    fn resolve(service_url: &str, meta: &LayerMeta) -> Self {
        let layer_url = format!("{}/{}", service_url, meta.id);
        let query_url = format!(
            "{}/query?where=1%3D1&outFields=*&returnGeometry=true&f=geojson",
            layer_url
        );
        Self {
            id: meta.id,
            name: meta.name.clone(),
            default_visibility: meta.default_visibility,
            style_url: layer_url.clone(),
            layer_url,
            query_url,
        }
    }
}
