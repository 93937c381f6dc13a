//! Core data models for the tracker.

mod context;
mod ids;
mod metric;
mod stats;

pub use context::*;
pub use ids::*;
pub use metric::*;
pub use stats::*;
