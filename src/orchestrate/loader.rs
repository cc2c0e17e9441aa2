use crate::core::extent::ExtentAccumulator;
use crate::data::geojson::features_extent;
use crate::layers::stack::LayerStack;
use crate::service::description::{LayerDescriptor, LayerId};
use crate::traits::{FeatureService, StyleResolver};
use crate::{Result, ViewerError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Tagged outcome of one layer's load task. Collected independently per
/// layer so a failure never cancels or hides a sibling.
#[derive(Debug)]
pub struct LayerOutcome {
    pub id: LayerId,
    pub name: String,
    /// `Err` carries [`ViewerError::StyleResolutionFailed`]; the layer is
    /// still in the stack either way.
    pub result: Result<()>,
}

impl LayerOutcome {
    pub fn is_styled(&self) -> bool {
        self.result.is_ok()
    }
}

/// Loads one descriptor: kicks off the feature query as a detached task and
/// resolves the style. The two completions are independent suspension
/// points; the orchestrator awaits only the style side.
///
/// Both completion paths check the generation token before touching shared
/// state, so a loader from a superseded refresh cycle can only ever discard
/// its own results.
pub(crate) struct LayerLoader {
    pub service: Arc<dyn FeatureService>,
    pub styles: Arc<dyn StyleResolver>,
    pub stack: Arc<Mutex<LayerStack>>,
    pub accumulator: Arc<ExtentAccumulator>,
    pub generation: Arc<AtomicU64>,
    /// The refresh cycle this loader belongs to
    pub cycle: u64,
    pub projection: String,
}

impl LayerLoader {
    /// Runs the load. Infallible by construction: per-layer failures are
    /// folded into the returned outcome. The second element is the detached
    /// feature-query task.
    pub async fn load(
        self,
        descriptor: LayerDescriptor,
    ) -> (LayerOutcome, tokio::task::JoinHandle<()>) {
        let features_task = self.spawn_feature_fetch(&descriptor);

        let result = match self
            .styles
            .resolve(&descriptor.style_url, &self.projection)
            .await
        {
            Ok(style) => {
                if self.is_current() {
                    if let Ok(mut stack) = self.stack.lock() {
                        stack.with_layer_mut(descriptor.id, |layer| layer.set_style(style));
                    }
                    log::debug!("style resolved for layer {}", descriptor.id);
                } else {
                    log::debug!(
                        "discarding style for layer {} from superseded cycle {}",
                        descriptor.id,
                        self.cycle
                    );
                }
                Ok(())
            }
            Err(e) => {
                let err = ViewerError::StyleResolutionFailed {
                    layer_id: descriptor.id,
                    reason: e.to_string(),
                };
                log::warn!("{}", err);
                if self.is_current() {
                    if let Ok(mut stack) = self.stack.lock() {
                        stack.with_layer_mut(descriptor.id, |layer| layer.set_style_failed());
                    }
                }
                Err(err)
            }
        };

        (
            LayerOutcome {
                id: descriptor.id,
                name: descriptor.name,
                result,
            },
            features_task,
        )
    }

    fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.cycle
    }

    fn spawn_feature_fetch(&self, descriptor: &LayerDescriptor) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let stack = Arc::clone(&self.stack);
        let accumulator = Arc::clone(&self.accumulator);
        let generation = Arc::clone(&self.generation);
        let cycle = self.cycle;
        let id = descriptor.id;
        let query_url = descriptor.query_url.clone();

        tokio::spawn(async move {
            match service.fetch_features(&query_url).await {
                Ok(geojson) => {
                    let features = geojson.into_features();
                    if generation.load(Ordering::SeqCst) != cycle {
                        log::debug!(
                            "discarding {} features for layer {} from superseded cycle {}",
                            features.len(),
                            id,
                            cycle
                        );
                        return;
                    }
                    let extent = features_extent(&features);
                    log::debug!("layer {} loaded {} features", id, features.len());
                    if let Ok(mut stack) = stack.lock() {
                        stack.with_layer_mut(id, |layer| {
                            layer.source_mut().set_features(features)
                        });
                    }
                    accumulator.merge(&extent);
                }
                Err(e) => {
                    let err = ViewerError::FeatureQueryFailed {
                        layer_id: id,
                        reason: e.to_string(),
                    };
                    log::warn!("{}", err);
                    if generation.load(Ordering::SeqCst) == cycle {
                        if let Ok(mut stack) = stack.lock() {
                            stack.with_layer_mut(id, |layer| layer.source_mut().set_failed());
                        }
                    }
                }
            }
        })
    }
}
