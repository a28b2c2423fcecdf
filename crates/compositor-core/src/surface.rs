//! Render surface hierarchy
//!
//! Every surface in the tree becomes one render pass. Child surfaces are
//! drawn into their own pass first and then composited by the parent.

use glam::{IVec2, Mat4, Vec3};

use crate::pass::{DrawQuad, RenderPassId};
use crate::types::Rect;

/// Index of a surface inside a [`SurfaceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(usize);

impl SurfaceId {
    /// The root surface of every tree.
    pub const ROOT: Self = Self(0);
}

/// A render surface owned by a layer.
#[derive(Debug, Clone)]
pub struct Surface {
    pub layer_id: u32,
    /// Output size in the surface's own space
    pub output_rect: Rect,
    /// Position of the surface inside its parent's output
    pub offset: IVec2,
    /// Opacity used when the parent composites this surface
    pub opacity: f32,
    /// Content drawn by the surface itself
    pub quads: Vec<DrawQuad>,
    parent: Option<SurfaceId>,
    children: Vec<SurfaceId>,
}

impl Surface {
    /// Pass id produced for this surface.
    pub fn pass_id(&self) -> RenderPassId {
        RenderPassId::new(self.layer_id, 0)
    }

    pub fn parent(&self) -> Option<SurfaceId> {
        self.parent
    }

    pub fn children(&self) -> &[SurfaceId] {
        &self.children
    }

    /// Rect this surface covers in its parent's output space.
    pub fn rect_in_parent(&self) -> Rect {
        Rect {
            origin: self.offset,
            size: self.output_rect.size,
        }
    }
}

/// Arena of render surfaces rooted at [`SurfaceId::ROOT`].
#[derive(Debug, Clone)]
pub struct SurfaceTree {
    surfaces: Vec<Surface>,
}

impl SurfaceTree {
    /// Create a tree with a single root surface.
    pub fn new(root_layer_id: u32, root_rect: Rect) -> Self {
        Self {
            surfaces: vec![Surface {
                layer_id: root_layer_id,
                output_rect: root_rect,
                offset: IVec2::ZERO,
                opacity: 1.0,
                quads: Vec::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Adds a child surface under `parent`.
    ///
    /// Returns None if the parent does not exist or the layer id is taken.
    pub fn add_child(
        &mut self,
        parent: SurfaceId,
        layer_id: u32,
        output_rect: Rect,
        offset: IVec2,
    ) -> Option<SurfaceId> {
        if parent.0 >= self.surfaces.len() {
            tracing::warn!("Surface parent {:?} not found", parent);
            return None;
        }
        if self.surfaces.iter().any(|s| s.layer_id == layer_id) {
            tracing::warn!("Layer {} already owns a surface", layer_id);
            return None;
        }

        let id = SurfaceId(self.surfaces.len());
        self.surfaces.push(Surface {
            layer_id,
            output_rect,
            offset,
            opacity: 1.0,
            quads: Vec::new(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.surfaces[parent.0].children.push(id);
        Some(id)
    }

    /// Gets a surface by id.
    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id.0)
    }

    /// Gets a mutable reference to a surface by id.
    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.get_mut(id.0)
    }

    pub fn root(&self) -> &Surface {
        &self.surfaces[SurfaceId::ROOT.0]
    }

    /// Returns the number of surfaces, root included.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Surfaces in draw order: children before parents, siblings in
    /// insertion order, root last.
    pub fn post_order(&self) -> Vec<SurfaceId> {
        let mut order = Vec::with_capacity(self.surfaces.len());
        // (surface, next child to visit)
        let mut stack = vec![(SurfaceId::ROOT, 0usize)];

        while let Some((id, next_child)) = stack.pop() {
            let children = &self.surfaces[id.0].children;
            if let Some(&child) = children.get(next_child) {
                stack.push((id, next_child + 1));
                stack.push((child, 0));
            } else {
                order.push(id);
            }
        }

        debug_assert_eq!(order.len(), self.surfaces.len());
        order
    }

    /// Accumulated transform from the surface's space to the root's space.
    pub fn transform_to_root(&self, id: SurfaceId) -> Mat4 {
        let mut transform = Mat4::IDENTITY;
        let mut current = self.get(id);
        while let Some(surface) = current {
            let offset = Vec3::new(surface.offset.x as f32, surface.offset.y as f32, 0.0);
            transform = Mat4::from_translation(offset) * transform;
            current = surface.parent.and_then(|p| self.get(p));
        }
        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_tree() -> (SurfaceTree, SurfaceId, SurfaceId, SurfaceId) {
        let mut tree = SurfaceTree::new(1, Rect::from_size(800, 600));
        let a = tree
            .add_child(SurfaceId::ROOT, 2, Rect::from_size(200, 200), IVec2::new(10, 20))
            .unwrap();
        let a1 = tree.add_child(a, 3, Rect::from_size(50, 50), IVec2::new(5, 5)).unwrap();
        let b = tree
            .add_child(SurfaceId::ROOT, 4, Rect::from_size(100, 100), IVec2::ZERO)
            .unwrap();
        (tree, a, a1, b)
    }

    #[test]
    fn test_post_order_children_first() {
        let (tree, a, a1, b) = sample_tree();
        assert_eq!(tree.post_order(), vec![a1, a, b, SurfaceId::ROOT]);
    }

    #[test]
    fn test_single_surface_order() {
        let tree = SurfaceTree::new(7, Rect::from_size(10, 10));
        assert_eq!(tree.post_order(), vec![SurfaceId::ROOT]);
        assert_eq!(tree.root().pass_id(), RenderPassId::new(7, 0));
    }

    #[test]
    fn test_duplicate_layer_rejected() {
        let (mut tree, a, _, _) = sample_tree();
        assert!(tree.add_child(a, 2, Rect::from_size(1, 1), IVec2::ZERO).is_none());
        assert!(tree
            .add_child(SurfaceId(99), 10, Rect::from_size(1, 1), IVec2::ZERO)
            .is_none());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_transform_to_root_accumulates_offsets() {
        let (tree, _, a1, _) = sample_tree();
        let origin = tree.transform_to_root(a1).transform_point3(Vec3::ZERO);
        assert_relative_eq!(origin.x, 15.0);
        assert_relative_eq!(origin.y, 25.0);
        assert_relative_eq!(origin.z, 0.0);
    }
}
