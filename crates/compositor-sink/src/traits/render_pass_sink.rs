//! RenderPassSink trait definition.

use compositor_core::RenderPass;

use crate::error::{SinkError, SinkResult};

/// A collection point for render passes produced during one
/// pass-generation cycle.
///
/// The producer hands over each finished pass and keeps no reference to it.
/// What happens next is up to the implementation: store it in order, relay
/// it to another sink, or discard it.
///
/// # Contract
///
/// - The sink takes exclusive ownership of every appended pass.
/// - Accumulating sinks store passes in append order. After a successful
///   append the stored count has grown by one and the new pass is last.
/// - A pass may only be dropped by sinks documented as no-op sinks.
/// - [`SinkError::OutOfResources`] is the only failure. It aborts the
///   current cycle and must not be retried.
///
/// Sinks are not synchronized. All appends of a cycle happen on one thread;
/// see [`crate::SharedSink`] for handing a sink to another thread.
pub trait RenderPassSink {
    /// Takes ownership of `pass`.
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()>;
}

impl<S: RenderPassSink + ?Sized> RenderPassSink for &mut S {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        (**self).append_render_pass(pass)
    }
}

impl<S: RenderPassSink + ?Sized> RenderPassSink for Box<S> {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        (**self).append_render_pass(pass)
    }
}

/// A plain vector is an unbounded ordered collector.
impl RenderPassSink for Vec<Box<RenderPass>> {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        self.try_reserve(1)
            .map_err(|_| SinkError::OutOfResources { capacity: None })?;
        self.push(pass);
        Ok(())
    }
}

/// Convenience operations available on every sink.
pub trait SinkExt: RenderPassSink {
    /// Appends passes in iteration order, stopping at the first error.
    ///
    /// Returns the number of passes appended.
    fn append_all<I>(&mut self, passes: I) -> SinkResult<usize>
    where
        I: IntoIterator<Item = Box<RenderPass>>,
    {
        let mut appended = 0;
        for pass in passes {
            self.append_render_pass(pass)?;
            appended += 1;
        }
        Ok(appended)
    }

    /// Moves the pass out of a producer-held slot and appends it.
    ///
    /// The slot is empty afterwards. Appending from an already emptied slot
    /// is a no-op and returns `Ok(false)`, so a handed-over pass can never
    /// be appended twice. If the append fails the pass is dropped along with
    /// the aborted cycle.
    fn append_from_slot(&mut self, slot: &mut Option<Box<RenderPass>>) -> SinkResult<bool> {
        match slot.take() {
            Some(pass) => {
                self.append_render_pass(pass)?;
                Ok(true)
            }
            None => {
                tracing::debug!("Ignoring append from an empty render pass slot");
                Ok(false)
            }
        }
    }
}

impl<S: RenderPassSink + ?Sized> SinkExt for S {}
