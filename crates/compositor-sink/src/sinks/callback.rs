//! Closure-backed sink.

use compositor_core::RenderPass;

use crate::error::SinkResult;
use crate::traits::RenderPassSink;

/// Adapts a closure into a [`RenderPassSink`].
///
/// The closure receives ownership of each pass, e.g. to stream it straight
/// to a renderer.
pub struct FnSink<F> {
    f: F,
}

/// Creates a sink that calls `f` for every appended pass.
pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(Box<RenderPass>) -> SinkResult<()>,
{
    FnSink { f }
}

impl<F> FnSink<F> {
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F> RenderPassSink for FnSink<F>
where
    F: FnMut(Box<RenderPass>) -> SinkResult<()>,
{
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        (self.f)(pass)
    }
}

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::test_utils::pass;
    use crate::traits::SinkExt;

    #[test]
    fn test_closure_receives_passes_in_order() {
        let mut seen = Vec::new();
        {
            let mut sink = from_fn(|p: Box<RenderPass>| {
                seen.push(p.id.layer_id);
                Ok(())
            });
            sink.append_all([pass(3), pass(1), pass(2)]).unwrap();
        }
        assert_eq!(seen, vec![3, 1, 2]);
    }

    #[test]
    fn test_closure_error_propagates() {
        let mut sink = from_fn(|_| Err(SinkError::OutOfResources { capacity: None }));
        assert!(sink.append_render_pass(pass(1)).is_err());
    }
}
