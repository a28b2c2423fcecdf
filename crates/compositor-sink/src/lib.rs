//! Compositor render pass sinks
//!
//! Decouples the stage that builds render passes from the stage that
//! consumes them. Producers hand each finished pass to a sink and keep no
//! reference to it.
//!
//! # Architecture
//!
//! - [`traits::RenderPassSink`] - Ownership-transferring append contract
//! - [`sinks::OrderedSink`] - In-memory collector preserving append order
//! - [`sinks::NullSink`] - No-op sink for tests and disabled compositing
//! - [`sinks::ForwardingSink`] - Relays to another sink and records metrics
//! - [`builder::PassBuilder`] - Emits one pass per surface, leaves first
//! - [`drawer::PassDrawer`] - Drains a sink and executes its passes in order
//! - [`compositor::Compositor`] - Runs build and draw once per frame from config
//!
//! # Example
//!
//! ```
//! use compositor_core::{Rect, SurfaceTree};
//! use compositor_sink::{OrderedSink, PassBuilder, PassDrawer};
//!
//! let tree = SurfaceTree::new(1, Rect::from_size(800, 600));
//! let mut sink = OrderedSink::new();
//! PassBuilder::new(&tree).build_into(&mut sink).unwrap();
//!
//! let report = PassDrawer::new().draw(&mut sink).unwrap();
//! assert_eq!(report.passes_drawn, 1);
//! ```

pub mod builder;
pub mod compositor;
pub mod drawer;
pub mod error;
pub mod sinks;
pub mod traits;

pub use builder::PassBuilder;
pub use compositor::Compositor;
pub use drawer::{DrawReport, PassDrawer};
pub use error::{CompositorError, DrawError, SinkError, SinkResult};
pub use sinks::{
    CycleGuard, FnSink, ForwardingSink, NullSink, OrderedSink, SharedSink, SinkMetrics, from_fn,
};
pub use traits::{RenderPassSink, SinkExt};

#[cfg(test)]
pub(crate) mod test_utils {
    use compositor_core::{Rect, RenderPass, RenderPassId};

    /// Routes log output through the test harness. Set `RUST_LOG` to see it.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// An empty pass owned by `layer_id`.
    pub fn pass(layer_id: u32) -> Box<RenderPass> {
        RenderPass::new(RenderPassId::new(layer_id, 0), Rect::from_size(16, 16))
    }

    /// Layer ids of `passes`, in iteration order.
    pub fn ids_of<'a>(passes: impl IntoIterator<Item = &'a RenderPass>) -> Vec<u32> {
        passes.into_iter().map(|p| p.id.layer_id).collect()
    }
}
