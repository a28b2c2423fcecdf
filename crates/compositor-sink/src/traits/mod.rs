//! Core traits for the sink system.
//!
//! This module defines the ownership-transferring append contract that
//! decouples pass production from pass consumption.

mod render_pass_sink;

pub use render_pass_sink::*;
