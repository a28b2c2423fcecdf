//! Forwarding sink with metrics.

use compositor_core::{MetricsConfig, RenderPass, RenderPassId};

use crate::error::SinkResult;
use crate::traits::RenderPassSink;

/// Counters collected by a [`ForwardingSink`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkMetrics {
    /// Passes accepted by the inner sink
    pub passes_forwarded: usize,
    /// Quads contained in forwarded passes
    pub quads_forwarded: usize,
    /// Forwarded quads that composite another pass
    pub render_pass_quads: usize,
    /// Appends the inner sink rejected
    pub failed_appends: usize,
    /// Id of the most recently forwarded pass
    pub last_pass: Option<RenderPassId>,
}

impl SinkMetrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Relays every pass unchanged to an inner sink while recording metrics.
///
/// The inner sink sees exactly the sequence it would have seen without the
/// wrapper. Errors from the inner sink are counted and returned as is.
#[derive(Debug)]
pub struct ForwardingSink<S> {
    inner: S,
    metrics: SinkMetrics,
    trace_passes: bool,
}

impl<S: RenderPassSink> ForwardingSink<S> {
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, &MetricsConfig::default())
    }

    pub fn with_config(inner: S, config: &MetricsConfig) -> Self {
        Self {
            inner,
            metrics: SinkMetrics::default(),
            trace_passes: config.trace_passes,
        }
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Clears the counters, e.g. at the start of a new cycle.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RenderPassSink> RenderPassSink for ForwardingSink<S> {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        let id = pass.id;
        let quads = pass.quads.len();
        let render_pass_quads = pass.render_pass_quad_count();

        if let Err(e) = self.inner.append_render_pass(pass) {
            self.metrics.failed_appends += 1;
            tracing::warn!("Forwarding render pass {} failed: {}", id, e);
            return Err(e);
        }

        if self.trace_passes {
            tracing::trace!(
                pass = %id,
                quads,
                render_pass_quads,
                "Forwarded render pass"
            );
        }

        self.metrics.passes_forwarded += 1;
        self.metrics.quads_forwarded += quads;
        self.metrics.render_pass_quads += render_pass_quads;
        self.metrics.last_pass = Some(id);
        Ok(())
    }
}
