//! Pass-generation cycle driver.
//!
//! Wires a [`PassBuilder`] to a metrics-recording [`ForwardingSink`] over an
//! [`OrderedSink`], then hands the collected passes to a [`PassDrawer`].

use compositor_core::{CompositorConfig, ConfigManager, SurfaceTree};

use crate::builder::PassBuilder;
use crate::drawer::{DrawReport, PassDrawer};
use crate::error::{CompositorError, SinkResult};
use crate::sinks::{ForwardingSink, OrderedSink, SinkMetrics};

/// Runs one pass-generation cycle per frame.
pub struct Compositor {
    sink: ForwardingSink<OrderedSink>,
    drawer: PassDrawer,
}

impl Compositor {
    /// Builds the sink chain from sink and metrics settings.
    pub fn new(config: &CompositorConfig) -> SinkResult<Self> {
        let storage = OrderedSink::from_config(&config.sink)?;
        Ok(Self {
            sink: ForwardingSink::with_config(storage, &config.metrics),
            drawer: PassDrawer::new(),
        })
    }

    /// Builds the compositor from the configuration held by `manager`.
    pub fn from_manager(manager: &ConfigManager) -> SinkResult<Self> {
        tracing::debug!("Creating compositor from {:?}", manager.path());
        Self::new(manager.config())
    }

    /// Generates and draws one frame.
    ///
    /// A sink failure aborts the cycle: the partial pass list is dropped so
    /// the next cycle starts from an empty sink.
    pub fn run_cycle(&mut self, tree: &SurfaceTree) -> Result<DrawReport, CompositorError> {
        self.sink.reset_metrics();

        if let Err(e) = PassBuilder::new(tree).build_into(&mut self.sink) {
            self.sink.inner_mut().clear();
            return Err(e.into());
        }

        let report = self.drawer.draw(self.sink.inner_mut())?;
        Ok(report)
    }

    /// Metrics of the most recent cycle.
    pub fn metrics(&self) -> &SinkMetrics {
        self.sink.metrics()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.drawer.frames_drawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::test_utils::init_tracing;
    use compositor_core::glam::IVec2;
    use compositor_core::{Rect, RenderPassId, SurfaceId};

    fn tree_with_children(children: u32) -> SurfaceTree {
        let mut tree = SurfaceTree::new(1, Rect::from_size(256, 256));
        for layer in 2..children + 2 {
            tree.add_child(SurfaceId::ROOT, layer, Rect::from_size(8, 8), IVec2::ZERO).unwrap();
        }
        tree
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("compositor-cycle-{}-{}", name, std::process::id()))
            .join("compositor.ron")
    }

    #[test]
    fn test_cycle_reports_and_records_metrics() {
        let mut compositor = Compositor::new(&CompositorConfig::new()).unwrap();
        let report = compositor.run_cycle(&tree_with_children(2)).unwrap();

        assert_eq!(report.passes_drawn, 3);
        assert_eq!(report.root(), Some(RenderPassId::new(1, 0)));
        assert_eq!(compositor.metrics().passes_forwarded, 3);
        assert_eq!(compositor.metrics().render_pass_quads, 2);
        assert_eq!(compositor.frames_drawn(), 1);
    }

    #[test]
    fn test_limit_from_saved_config_aborts_cycle() {
        init_tracing();
        let path = scratch_path("limit");
        let mut manager = ConfigManager::load(&path).unwrap();
        manager.update(|c| c.sink.max_passes = Some(2));
        manager.save().unwrap();

        let manager = ConfigManager::load(&path).unwrap();
        let mut compositor = Compositor::from_manager(&manager).unwrap();

        let err = compositor.run_cycle(&tree_with_children(3)).unwrap_err();
        assert_eq!(
            err,
            CompositorError::Sink(SinkError::OutOfResources { capacity: Some(2) })
        );
        assert_eq!(compositor.metrics().failed_appends, 1);
        assert_eq!(compositor.frames_drawn(), 0);

        // The aborted cycle leaves nothing behind for the next one.
        let report = compositor.run_cycle(&tree_with_children(1)).unwrap();
        assert_eq!(report.passes_drawn, 2);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unreservable_config_is_rejected() {
        let mut config = CompositorConfig::new();
        config.sink.initial_capacity = usize::MAX;
        assert!(matches!(
            Compositor::new(&config),
            Err(SinkError::OutOfResources { capacity: None })
        ));
    }
}
