//! Pass generation from a surface tree.

use compositor_core::{DrawQuad, Rect, RenderPass, SurfaceTree};

use crate::error::SinkResult;
use crate::traits::RenderPassSink;

/// Produces one render pass per surface and appends them to a sink.
///
/// Passes are emitted children first, so every pass reaches the sink after
/// the passes it composites and the root pass is always last.
pub struct PassBuilder<'a> {
    tree: &'a SurfaceTree,
}

impl<'a> PassBuilder<'a> {
    pub fn new(tree: &'a SurfaceTree) -> Self {
        Self { tree }
    }

    /// Runs one generation cycle into `sink`.
    ///
    /// Returns the number of passes appended. The first sink error aborts
    /// the cycle and is returned unchanged.
    pub fn build_into<S: RenderPassSink + ?Sized>(&self, sink: &mut S) -> SinkResult<usize> {
        let order = self.tree.post_order();
        let mut appended = 0;

        for id in order {
            let Some(surface) = self.tree.get(id) else {
                continue;
            };

            let mut pass = RenderPass::new(surface.pass_id(), surface.output_rect)
                .with_transform(self.tree.transform_to_root(id));
            if surface.parent().is_none() {
                pass = pass.with_opaque_background();
            }

            let mut damage = Rect::ZERO;
            for child in surface.children().iter().filter_map(|&c| self.tree.get(c)) {
                let visible = child.rect_in_parent().intersection(&surface.output_rect);
                if visible.is_empty() {
                    tracing::trace!("Surface {} lies outside its parent", child.layer_id);
                    continue;
                }
                damage = damage.union(&visible);
                pass.quads.push(
                    DrawQuad::render_pass(visible, child.pass_id()).with_opacity(child.opacity),
                );
            }
            for quad in &surface.quads {
                damage = damage.union(&quad.rect.intersection(&surface.output_rect));
            }
            pass.quads.extend_from_slice(&surface.quads);

            debug_assert!(surface.output_rect.contains(&damage));
            pass = pass.with_damage(damage);

            if let Err(e) = sink.append_render_pass(pass) {
                tracing::warn!("Pass generation aborted after {} passes: {}", appended, e);
                return Err(e);
            }
            appended += 1;
        }

        tracing::debug!("Generated {} render passes", appended);
        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::sinks::{NullSink, OrderedSink};
    use crate::test_utils::ids_of;
    use compositor_core::glam::IVec2;
    use compositor_core::{QuadMaterial, RenderPassId, SurfaceId};

    fn tree() -> SurfaceTree {
        let mut tree = SurfaceTree::new(1, Rect::from_size(640, 480));
        let a = tree
            .add_child(SurfaceId::ROOT, 2, Rect::from_size(100, 100), IVec2::new(10, 10))
            .unwrap();
        tree.add_child(a, 3, Rect::from_size(20, 20), IVec2::ZERO).unwrap();
        tree.add_child(SurfaceId::ROOT, 4, Rect::from_size(50, 50), IVec2::new(200, 0)).unwrap();
        tree.get_mut(SurfaceId::ROOT)
            .unwrap()
            .quads
            .push(DrawQuad::solid(Rect::from_size(640, 480), [1.0; 4]));
        tree
    }

    #[test]
    fn test_leaves_before_root() {
        let tree = tree();
        let mut sink = OrderedSink::new();
        let count = PassBuilder::new(&tree).build_into(&mut sink).unwrap();

        assert_eq!(count, 4);
        assert_eq!(ids_of(sink.iter()), vec![3, 2, 4, 1]);
        assert!(!sink.last().unwrap().has_transparent_background);
    }

    #[test]
    fn test_parent_composites_children_then_own_quads() {
        let tree = tree();
        let mut sink = OrderedSink::new();
        PassBuilder::new(&tree).build_into(&mut sink).unwrap();

        let root = sink.last().unwrap();
        let refs: Vec<_> = root.referenced_passes().collect();
        assert_eq!(refs, vec![RenderPassId::new(2, 0), RenderPassId::new(4, 0)]);
        assert_eq!(root.quads.len(), 3);
        assert!(matches!(root.quads[2].material, QuadMaterial::SolidColor(_)));
        assert_eq!(root.quads[1].rect, Rect::new(200, 0, 50, 50));
    }

    #[test]
    fn test_child_quads_clipped_to_parent_output() {
        let mut tree = SurfaceTree::new(1, Rect::from_size(100, 100));
        tree.add_child(SurfaceId::ROOT, 2, Rect::from_size(40, 40), IVec2::new(80, 80)).unwrap();
        tree.add_child(SurfaceId::ROOT, 3, Rect::from_size(10, 10), IVec2::new(500, 0)).unwrap();

        let mut sink = OrderedSink::new();
        PassBuilder::new(&tree).build_into(&mut sink).unwrap();

        let root = sink.last().unwrap();
        assert_eq!(root.quads.len(), 1);
        assert_eq!(root.quads[0].rect, Rect::new(80, 80, 20, 20));
        assert_eq!(root.damage_rect, Rect::new(80, 80, 20, 20));
    }

    #[test]
    fn test_damage_is_union_of_content() {
        let tree = tree();
        let mut sink = OrderedSink::new();
        PassBuilder::new(&tree).build_into(&mut sink).unwrap();

        // Leaf without content damages nothing.
        let leaf = sink.find(RenderPassId::new(3, 0)).unwrap();
        assert!(leaf.damage_rect.is_empty());

        let a = sink.find(RenderPassId::new(2, 0)).unwrap();
        assert_eq!(a.damage_rect, Rect::from_size(20, 20));

        let root = sink.last().unwrap();
        assert_eq!(root.damage_rect, root.output_rect);
    }

    #[test]
    fn test_sink_error_aborts_cycle() {
        let tree = tree();
        let mut sink = OrderedSink::with_capacity_limit(2);
        let err = PassBuilder::new(&tree).build_into(&mut sink).unwrap_err();

        assert_eq!(err, SinkError::OutOfResources { capacity: Some(2) });
        assert_eq!(ids_of(sink.iter()), vec![3, 2]);
    }

    #[test]
    fn test_build_into_dyn_sink() {
        let tree = tree();
        let mut null = NullSink::new();
        let sink: &mut dyn RenderPassSink = &mut null;
        assert_eq!(PassBuilder::new(&tree).build_into(sink).unwrap(), 4);
        assert_eq!(null.discarded(), 4);
    }
}
