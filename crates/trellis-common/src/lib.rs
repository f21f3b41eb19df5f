//! Common utilities for the Trellis layout engine.
//!
//! This crate provides shared infrastructure used by the other Trellis crates:
//! - **Diagnostics** - structured, deduplicated warnings about CSS values the
//!   engine had to fall back on

pub mod warning;

pub use warning::{Diagnostics, Warning};
