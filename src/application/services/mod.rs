//! Application services
//!
//! Services compose the domain builders with settings-driven behavior.

pub mod render;

pub use render::{BuildOptions, RenderService, TreeSummary};
