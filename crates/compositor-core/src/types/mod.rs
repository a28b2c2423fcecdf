//! Core type definitions

mod rect;

pub use rect::*;
