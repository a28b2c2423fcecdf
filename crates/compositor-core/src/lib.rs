//! Compositor core data model
//!
//! Types shared by every stage of a pass-generation cycle:
//!
//! - [`pass::RenderPass`] - one batch of draw work, moved between stages as `Box<RenderPass>`
//! - [`surface::SurfaceTree`] - render surfaces that each contribute one pass
//! - [`config::CompositorConfig`] - sink and diagnostics settings, stored as RON

pub mod config;
pub mod pass;
pub mod surface;
pub mod types;

pub use config::{CompositorConfig, ConfigError, ConfigManager, MetricsConfig, SinkConfig};
pub use pass::{DrawQuad, QuadMaterial, RenderPass, RenderPassId};
pub use surface::{Surface, SurfaceId, SurfaceTree};
pub use types::Rect;

pub use glam;
