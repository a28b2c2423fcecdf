//! Sink that discards everything.

use compositor_core::RenderPass;

use crate::error::SinkResult;
use crate::traits::RenderPassSink;

/// A no-op sink: every appended pass is dropped immediately.
///
/// Used in tests and when compositing is disabled. Never fails and never
/// stores anything, so [`NullSink::len`] is always zero.
#[derive(Debug, Default, Clone)]
pub struct NullSink {
    discarded: usize,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always zero.
    pub fn len(&self) -> usize {
        0
    }

    /// Always true.
    pub fn is_empty(&self) -> bool {
        true
    }

    /// Number of passes dropped so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl RenderPassSink for NullSink {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        tracing::trace!("Discarding render pass {}", pass.id);
        self.discarded += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::pass;
    use crate::traits::SinkExt;

    #[test]
    fn test_accepts_everything_stores_nothing() {
        let mut sink = NullSink::new();
        let appended = sink.append_all((0..100).map(pass)).unwrap();

        assert_eq!(appended, 100);
        assert_eq!(sink.len(), 0);
        assert!(sink.is_empty());
        assert_eq!(sink.discarded(), 100);
    }

    #[test]
    fn test_count_survives_handing_sink_to_producer() {
        fn produce(sink: &mut dyn RenderPassSink) {
            sink.append_render_pass(pass(1)).unwrap();
            sink.append_render_pass(pass(2)).unwrap();
        }

        let mut sink = NullSink::new();
        produce(&mut sink);
        let snapshot = sink.clone();
        produce(&mut sink);

        assert_eq!(sink.discarded(), 4);
        assert_eq!(snapshot.discarded(), 2);
    }
}
