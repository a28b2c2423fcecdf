//! In-memory ordered collector.

use compositor_core::{RenderPass, RenderPassId, SinkConfig};

use crate::error::{SinkError, SinkResult};
use crate::traits::RenderPassSink;

/// Stores appended passes in append order for a later drawing stage.
///
/// The sink is reusable across cycles: [`OrderedSink::drain`] and
/// [`OrderedSink::clear`] both leave it empty with its capacity limit kept.
#[derive(Debug, Default)]
pub struct OrderedSink {
    passes: Vec<Box<RenderPass>>,
    max_passes: Option<usize>,
}

impl OrderedSink {
    /// Creates an unbounded sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that refuses to store more than `max_passes` passes.
    pub fn with_capacity_limit(max_passes: usize) -> Self {
        Self {
            passes: Vec::new(),
            max_passes: Some(max_passes),
        }
    }

    /// Creates a sink from storage settings.
    ///
    /// Fails with [`SinkError::OutOfResources`] if the initial reservation
    /// cannot be allocated.
    pub fn from_config(config: &SinkConfig) -> SinkResult<Self> {
        let reserve = match config.max_passes {
            Some(max) => config.initial_capacity.min(max),
            None => config.initial_capacity,
        };
        let mut passes = Vec::new();
        passes.try_reserve(reserve).map_err(|_| {
            tracing::warn!("Cannot reserve {} render pass slots", reserve);
            SinkError::OutOfResources {
                capacity: config.max_passes,
            }
        })?;
        Ok(Self {
            passes,
            max_passes: config.max_passes,
        })
    }

    /// Returns the configured limit, if any.
    pub fn capacity_limit(&self) -> Option<usize> {
        self.max_passes
    }

    /// Returns the number of stored passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Returns true if no pass is stored.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Iterates stored passes in append order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderPass> {
        self.passes.iter().map(|p| p.as_ref())
    }

    /// Gets the pass at `index` in append order.
    pub fn get(&self, index: usize) -> Option<&RenderPass> {
        self.passes.get(index).map(|p| p.as_ref())
    }

    /// Finds a stored pass by id.
    pub fn find(&self, id: RenderPassId) -> Option<&RenderPass> {
        self.iter().find(|p| p.id == id)
    }

    /// The most recently appended pass.
    pub fn last(&self) -> Option<&RenderPass> {
        self.passes.last().map(|p| p.as_ref())
    }

    /// Ids of stored passes in append order.
    pub fn ids(&self) -> Vec<RenderPassId> {
        self.iter().map(|p| p.id).collect()
    }

    /// Removes and returns all passes in append order (FIFO).
    pub fn drain(&mut self) -> Vec<Box<RenderPass>> {
        tracing::trace!("Draining {} render passes", self.passes.len());
        std::mem::take(&mut self.passes)
    }

    /// Drops all stored passes.
    pub fn clear(&mut self) {
        self.passes.clear();
    }

    /// Consumes the sink, returning its passes in append order.
    pub fn into_passes(self) -> Vec<Box<RenderPass>> {
        self.passes
    }
}

impl RenderPassSink for OrderedSink {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        if let Some(max) = self.max_passes {
            if self.passes.len() >= max {
                tracing::warn!(
                    "Render pass sink full ({} passes), rejecting pass {}",
                    max,
                    pass.id
                );
                return Err(SinkError::OutOfResources {
                    capacity: Some(max),
                });
            }
        }

        self.passes
            .try_reserve(1)
            .map_err(|_| SinkError::OutOfResources {
                capacity: self.max_passes,
            })?;

        let before = self.passes.len();
        self.passes.push(pass);
        debug_assert_eq!(self.passes.len(), before + 1);
        Ok(())
    }
}

impl IntoIterator for OrderedSink {
    type Item = Box<RenderPass>;
    type IntoIter = std::vec::IntoIter<Box<RenderPass>>;

    fn into_iter(self) -> Self::IntoIter {
        self.passes.into_iter()
    }
}
