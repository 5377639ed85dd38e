//! Output Generation
//!
//! Per-tick statistics, world snapshots, and portrayal descriptors for
//! the external rendering layer.

pub mod portrayal;
pub mod snapshot;
pub mod stats;

pub use portrayal::*;
pub use snapshot::*;
pub use stats::*;
