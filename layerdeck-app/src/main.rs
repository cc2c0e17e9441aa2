use layerdeck::prelude::*;
use std::sync::Arc;

/// Console feature-service viewer: loads every layer of a service, prints
/// the legend, and reports per-layer load outcomes.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let default_url = "https://services3.arcgis.com/GVgbJbqm8hXASVYi/ArcGIS/rest/services/2020_Earthquakes/FeatureServer";
    let service_url = std::env::args().nth(1).unwrap_or_else(|| default_url.to_string());

    let orchestrator = LayerOrchestrator::new(
        Arc::new(ServiceClient::new()),
        Arc::new(DefaultStyles),
        Arc::new(HeadlessMap),
        Box::new(ConsoleLegend),
        RefreshOptions::default(),
    );

    println!("Loading {}", service_url);
    let report = orchestrator.refresh(&service_url).await?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("  layer {} ({}) styled", outcome.id, outcome.name),
            Err(e) => println!("  layer {} ({}) degraded: {}", outcome.id, outcome.name, e),
        }
    }

    Ok(())
}

/// Styles every layer with the default feature style; a real embedder would
/// fetch and translate the service's drawing info here.
struct DefaultStyles;

#[async_trait::async_trait]
impl StyleResolver for DefaultStyles {
    async fn resolve(&self, style_url: &str, _projection: &str) -> Result<StyleFunction> {
        log::debug!("default style for {}", style_url);
        Ok(Arc::new(|_| FeatureStyle::default()))
    }
}

/// Map surface with no renderer attached: fits are logged, hit tests are
/// empty.
struct HeadlessMap;

impl MapSurface for HeadlessMap {
    fn projection(&self) -> String {
        "EPSG:3857".to_string()
    }

    fn fit_view(&self, extent: &Extent, _options: &FitOptions) {
        log::info!(
            "fit view to [{}, {}, {}, {}]",
            extent.min.x,
            extent.min.y,
            extent.max.x,
            extent.max.y
        );
    }

    fn features_at_pixel(&self, _pixel: Point) -> Vec<GeoJsonFeature> {
        Vec::new()
    }

    fn pixel_from_coordinate(&self, coordinate: Point) -> Point {
        coordinate
    }
}

/// Prints legend rows to stdout
struct ConsoleLegend;

impl LegendPort for ConsoleLegend {
    fn clear(&mut self) {}

    fn push_row(&mut self, row: &LegendRow) {
        let mark = if row.checked { "x" } else { " " };
        println!("  [{}] {}", mark, row.label);
    }

    fn set_checked(&mut self, layer_id: LayerId, checked: bool) {
        println!("  layer {} -> {}", layer_id, if checked { "shown" } else { "hidden" });
    }
}
