//! Final pass drawer.
//!
//! Consumes the passes collected during a cycle in append order and checks
//! that every composited pass was drawn before the pass that uses it.

use std::collections::HashSet;

use compositor_core::{RenderPass, RenderPassId};

use crate::error::DrawError;
use crate::sinks::OrderedSink;

/// Summary of one drawn frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub passes_drawn: usize,
    pub quads_drawn: usize,
    /// Damaged pixels across all passes, clipped to each pass's output
    pub pixels_damaged: i64,
    /// Pass ids in execution order
    pub draw_order: Vec<RenderPassId>,
}

impl DrawReport {
    /// The root pass, drawn last.
    pub fn root(&self) -> Option<RenderPassId> {
        self.draw_order.last().copied()
    }
}

/// Executes drained pass lists, one frame at a time.
#[derive(Debug, Default)]
pub struct PassDrawer {
    frames_drawn: u64,
}

impl PassDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn successfully.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Drains `sink` (FIFO) and draws its passes.
    ///
    /// The sink is empty afterwards, ready for the next cycle.
    pub fn draw(&mut self, sink: &mut OrderedSink) -> Result<DrawReport, DrawError> {
        self.draw_passes(sink.drain())
    }

    /// Draws passes in the given order.
    pub fn draw_passes<I>(&mut self, passes: I) -> Result<DrawReport, DrawError>
    where
        I: IntoIterator<Item = Box<RenderPass>>,
    {
        let mut drawn = HashSet::new();
        let mut report = DrawReport::default();

        for pass in passes {
            for missing in pass.referenced_passes() {
                if !drawn.contains(&missing) {
                    tracing::warn!("Pass {} references undrawn pass {}", pass.id, missing);
                    return Err(DrawError::UnresolvedPass {
                        pass: pass.id,
                        missing,
                    });
                }
            }
            if !drawn.insert(pass.id) {
                return Err(DrawError::DuplicatePass(pass.id));
            }

            report.passes_drawn += 1;
            report.quads_drawn += pass.quads.len();
            report.pixels_damaged += pass.damage_rect.intersection(&pass.output_rect).area();
            report.draw_order.push(pass.id);
        }

        self.frames_drawn += 1;
        tracing::debug!(
            "Drew frame {}: {} passes, {} quads, {} damaged pixels",
            self.frames_drawn,
            report.passes_drawn,
            report.quads_drawn,
            report.pixels_damaged
        );
        Ok(report)
    }
}
