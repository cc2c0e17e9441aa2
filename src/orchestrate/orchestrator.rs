use crate::core::extent::ExtentAccumulator;
use crate::layers::{loaded::LoadedLayer, stack::LayerStack};
use crate::orchestrate::loader::{LayerLoader, LayerOutcome};
use crate::service::description::LayerId;
use crate::traits::{FeatureService, FitOptions, LegendPort, MapSurface, StyleResolver};
use crate::ui::legend::LegendView;
use crate::{Result, ViewerError};
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Configuration of the refresh cycle
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    /// Display name of the fixed base layer at stack index 0
    pub base_layer_name: String,
    /// Fit the view to the union of all layer extents after a refresh.
    /// When enabled, `refresh` additionally awaits the feature queries so
    /// the union is complete before fitting.
    pub fit_view_on_load: bool,
    pub fit_options: FitOptions,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            base_layer_name: "OpenStreetMap".to_string(),
            fit_view_on_load: false,
            fit_options: FitOptions::default(),
        }
    }
}

/// What one completed refresh cycle did
#[derive(Debug)]
pub struct RefreshReport {
    /// Generation token of this cycle
    pub generation: u64,
    /// True when a newer refresh superseded this one mid-flight; the legend
    /// and map were left untouched by this cycle's completion.
    pub stale: bool,
    /// Per-layer outcomes in descriptor order
    pub outcomes: Vec<LayerOutcome>,
}

/// Drives the full layer lifecycle: teardown, descriptor discovery,
/// concurrent per-layer loading, legend rebuild and optional view fitting.
///
/// Each refresh cycle owns a fresh [`ExtentAccumulator`] and carries a
/// monotonically increasing generation token; late completions from a
/// superseded cycle detect the mismatch and discard themselves instead of
/// mutating a legend that no longer matches the descriptor list.
pub struct LayerOrchestrator {
    service: Arc<dyn FeatureService>,
    styles: Arc<dyn StyleResolver>,
    map: Arc<dyn MapSurface>,
    stack: Arc<Mutex<LayerStack>>,
    legend: Mutex<LegendView>,
    generation: Arc<AtomicU64>,
    options: RefreshOptions,
}

impl LayerOrchestrator {
    pub fn new(
        service: Arc<dyn FeatureService>,
        styles: Arc<dyn StyleResolver>,
        map: Arc<dyn MapSurface>,
        legend_port: Box<dyn LegendPort>,
        options: RefreshOptions,
    ) -> Self {
        Self {
            service,
            styles,
            map,
            stack: Arc::new(Mutex::new(LayerStack::new(options.base_layer_name.clone()))),
            legend: Mutex::new(LegendView::new(legend_port)),
            generation: Arc::new(AtomicU64::new(0)),
            options,
        }
    }

    /// Shared handle to the layer stack, for embedders that render it
    pub fn stack(&self) -> Arc<Mutex<LayerStack>> {
        Arc::clone(&self.stack)
    }

    /// Generation token of the most recently started refresh cycle
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Tears down the previous layer set and rebuilds it from the service
    /// description at `service_url`.
    ///
    /// Stack append order is fixed synchronously at dispatch time, so legend
    /// row `i` always describes stack layer `i + 1` no matter which layer's
    /// network calls finish first. Style resolutions are awaited before the
    /// legend rebuild; feature queries keep streaming in afterwards.
    pub async fn refresh(&self, service_url: &str) -> Result<RefreshReport> {
        let cycle = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("refresh cycle {} for {}", cycle, service_url);

        self.lock_stack()?.clear_overlays();
        self.lock_legend()?.clear();

        let description = self.service.fetch_description(service_url).await?;
        if self.generation.load(Ordering::SeqCst) != cycle {
            log::debug!("cycle {} superseded during description fetch", cycle);
            return Ok(RefreshReport {
                generation: cycle,
                stale: true,
                outcomes: Vec::new(),
            });
        }
        let descriptors = description.descriptors(service_url);
        log::info!("service describes {} layers", descriptors.len());

        let accumulator = Arc::new(ExtentAccumulator::new());
        let projection = self.map.projection();

        // Append order decided here, before any load completes
        {
            let mut stack = self.lock_stack()?;
            for descriptor in &descriptors {
                stack.push(LoadedLayer::new(descriptor.clone()));
            }
        }

        let mut tasks = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors.iter().cloned() {
            let loader = LayerLoader {
                service: Arc::clone(&self.service),
                styles: Arc::clone(&self.styles),
                stack: Arc::clone(&self.stack),
                accumulator: Arc::clone(&accumulator),
                generation: Arc::clone(&self.generation),
                cycle,
                projection: projection.clone(),
            };
            tasks.push(loader.load(descriptor));
        }

        // Legend readiness gates on style resolution only
        let (outcomes, feature_tasks): (Vec<_>, Vec<_>) = join_all(tasks).await.into_iter().unzip();

        if self.generation.load(Ordering::SeqCst) != cycle {
            log::debug!("cycle {} superseded before legend rebuild", cycle);
            return Ok(RefreshReport {
                generation: cycle,
                stale: true,
                outcomes,
            });
        }

        {
            let stack = self.lock_stack()?;
            let mut legend = self.lock_legend()?;
            legend.rebuild(&descriptors, &stack);
        }

        if self.options.fit_view_on_load {
            for task in feature_tasks {
                let _ = task.await;
            }
            if self.generation.load(Ordering::SeqCst) == cycle {
                let extent = accumulator.snapshot();
                if extent.is_empty() {
                    log::debug!("no extent accumulated, skipping view fit");
                } else {
                    self.map.fit_view(&extent, &self.options.fit_options);
                }
            }
        }

        Ok(RefreshReport {
            generation: cycle,
            stale: false,
            outcomes,
        })
    }

    /// Legend checkbox action: sets one layer's visibility and mirrors the
    /// row state. No other layer is touched.
    pub fn set_layer_visible(&self, id: LayerId, visible: bool) -> Result<()> {
        let mut stack = self.lock_stack()?;
        let mut legend = self.lock_legend()?;
        legend.toggle(&mut stack, id, visible);
        Ok(())
    }

    /// Legend zoom action: fits the view to the layer's current extent,
    /// no-op when the layer has none
    pub fn zoom_to_layer(&self, id: LayerId) -> Result<()> {
        let stack = self.lock_stack()?;
        let legend = self.lock_legend()?;
        legend.zoom(&stack, self.map.as_ref(), id);
        Ok(())
    }

    /// Legend rows as last rebuilt, in descriptor order
    pub fn legend_rows(&self) -> Result<Vec<crate::ui::legend::LegendRow>> {
        Ok(self.lock_legend()?.rows().to_vec())
    }

    fn lock_stack(&self) -> Result<MutexGuard<'_, LayerStack>> {
        self.stack
            .lock()
            .map_err(|_| ViewerError::Layer("layer stack lock poisoned".to_string()))
    }

    fn lock_legend(&self) -> Result<MutexGuard<'_, LegendView>> {
        self.legend
            .lock()
            .map_err(|_| ViewerError::Layer("legend lock poisoned".to_string()))
    }
}
