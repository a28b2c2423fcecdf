//! Consumer-side synchronization for sinks crossing threads.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use compositor_core::RenderPass;
use parking_lot::{Mutex, MutexGuard};

use crate::error::SinkResult;
use crate::traits::RenderPassSink;

/// Shared handle to a sink owned by a consumer on another thread.
///
/// Sinks carry no locking of their own. The producer locks the sink once
/// per pass-generation cycle with [`SharedSink::lock_cycle`] and appends
/// through the returned guard.
#[derive(Debug)]
pub struct SharedSink<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedSink<S> {
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Locks the sink for a whole generation cycle.
    pub fn lock_cycle(&self) -> CycleGuard<'_, S> {
        CycleGuard {
            guard: self.inner.lock(),
        }
    }

    /// Returns the sink if this is the last handle.
    pub fn try_unwrap(self) -> Result<S, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Exclusive access to a [`SharedSink`] for the duration of one cycle.
pub struct CycleGuard<'a, S> {
    guard: MutexGuard<'a, S>,
}

impl<S> Deref for CycleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard
    }
}

impl<S> DerefMut for CycleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.guard
    }
}

impl<S: RenderPassSink> RenderPassSink for CycleGuard<'_, S> {
    fn append_render_pass(&mut self, pass: Box<RenderPass>) -> SinkResult<()> {
        self.guard.append_render_pass(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::OrderedSink;
    use crate::test_utils::{ids_of, pass};
    use crate::traits::SinkExt;

    #[test]
    fn test_cycle_on_producer_thread() {
        let shared = SharedSink::new(OrderedSink::new());
        let producer = shared.clone();

        std::thread::spawn(move || {
            let mut cycle = producer.lock_cycle();
            cycle.append_all([pass(1), pass(2), pass(3)]).unwrap();
        })
        .join()
        .unwrap();

        let sink = shared.try_unwrap().unwrap();
        assert_eq!(ids_of(sink.iter()), vec![1, 2, 3]);
    }

    #[test]
    fn test_try_unwrap_with_outstanding_handle() {
        let shared = SharedSink::new(OrderedSink::new());
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        assert!(shared.try_unwrap().is_ok());
    }
}
