//! Concrete sink implementations.

mod callback;
mod forwarding;
mod null;
mod ordered;
mod shared;

pub use callback::{FnSink, from_fn};
pub use forwarding::{ForwardingSink, SinkMetrics};
pub use null::NullSink;
pub use ordered::OrderedSink;
pub use shared::{CycleGuard, SharedSink};
