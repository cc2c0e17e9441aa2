pub mod inspector;
pub mod legend;

pub use inspector::{FeatureInspector, InspectorContent, MapClick, PanelPosition};
pub use legend::{LegendRow, LegendView};
