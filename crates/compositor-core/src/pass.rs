//! Render pass definitions
//!
//! A [`RenderPass`] is one batch of draw work targeting a single output
//! surface or intermediate buffer. Passes are handed between pipeline stages
//! as `Box<RenderPass>`; the type is deliberately not `Clone`, so a pass has
//! exactly one owner at any time.

use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Identifier of a render pass within one pass-generation cycle.
///
/// `layer_id` names the layer owning the render surface, `index` separates
/// several passes contributed by the same layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderPassId {
    pub layer_id: u32,
    pub index: u32,
}

impl RenderPassId {
    pub const fn new(layer_id: u32, index: u32) -> Self {
        Self { layer_id, index }
    }
}

impl fmt::Display for RenderPassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.layer_id, self.index)
    }
}

/// What a quad draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum QuadMaterial {
    /// Flat RGBA fill
    SolidColor([f32; 4]),
    /// Composites the output of another pass, which must be drawn earlier
    RenderPass(RenderPassId),
}

/// A single quad inside a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawQuad {
    /// Target rect in the pass's output space
    pub rect: Rect,
    /// Opacity applied when blending the quad (0.0 - 1.0)
    pub opacity: f32,
    pub material: QuadMaterial,
}

impl DrawQuad {
    /// Create an opaque solid color quad
    pub fn solid(rect: Rect, color: [f32; 4]) -> Self {
        Self {
            rect,
            opacity: 1.0,
            material: QuadMaterial::SolidColor(color),
        }
    }

    /// Create a quad compositing another pass
    pub fn render_pass(rect: Rect, pass_id: RenderPassId) -> Self {
        Self {
            rect,
            opacity: 1.0,
            material: QuadMaterial::RenderPass(pass_id),
        }
    }

    /// Set the blend opacity, clamped to `[0, 1]`. NaN becomes 0.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    /// Returns the referenced pass if this quad composites one.
    pub fn referenced_pass(&self) -> Option<RenderPassId> {
        match self.material {
            QuadMaterial::RenderPass(id) => Some(id),
            QuadMaterial::SolidColor(_) => None,
        }
    }
}

/// One unit of drawing work.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderPass {
    pub id: RenderPassId,
    /// Size and position of the pass's output surface
    pub output_rect: Rect,
    /// Part of the output that changed since the previous cycle
    pub damage_rect: Rect,
    /// Maps the output surface into root target space
    pub transform_to_root: Mat4,
    pub has_transparent_background: bool,
    pub quads: Vec<DrawQuad>,
}

impl RenderPass {
    /// Create an empty pass whose whole output is damaged.
    pub fn new(id: RenderPassId, output_rect: Rect) -> Box<Self> {
        Box::new(Self {
            id,
            output_rect,
            damage_rect: output_rect,
            transform_to_root: Mat4::IDENTITY,
            has_transparent_background: true,
            quads: Vec::new(),
        })
    }

    pub fn with_damage(mut self: Box<Self>, damage_rect: Rect) -> Box<Self> {
        self.damage_rect = damage_rect;
        self
    }

    pub fn with_transform(mut self: Box<Self>, transform_to_root: Mat4) -> Box<Self> {
        self.transform_to_root = transform_to_root;
        self
    }

    pub fn with_opaque_background(mut self: Box<Self>) -> Box<Self> {
        self.has_transparent_background = false;
        self
    }

    pub fn with_quad(mut self: Box<Self>, quad: DrawQuad) -> Box<Self> {
        self.quads.push(quad);
        self
    }

    /// Ids of the passes this pass composites, in quad order.
    pub fn referenced_passes(&self) -> impl Iterator<Item = RenderPassId> + '_ {
        self.quads.iter().filter_map(DrawQuad::referenced_pass)
    }

    /// Number of quads compositing another pass
    pub fn render_pass_quad_count(&self) -> usize {
        self.referenced_passes().count()
    }
}
