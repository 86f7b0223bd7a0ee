//! Index rebuilding
//!
//! - `resolver`: which node a point is grouped under
//! - `engine`: full-tree rebuild with per-node fault isolation
//! - `events`: rebuild lifecycle notifications
//!
//! @module reindex

pub mod engine;
pub mod events;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::{
    EngineState, NodeError, NodeOutcome, RebuildReport, ReindexEngine, RunRecord, RunStatus,
    SkipCounts, SkipReason,
};
pub use events::{RebuildEvent, RebuildEvents};
pub use resolver::{Resolution, SourceResolver};
