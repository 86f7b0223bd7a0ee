//! station-index - flat point catalog for facility-automation stations
//!
//! Walks a station's component tree, groups every control point under the
//! device or folder it belongs to, and publishes the result as an
//! immutable snapshot that readers can query without locking.

pub mod cli;
pub mod core;
pub mod index;
pub mod output;
pub mod point;
pub mod reindex;
pub mod service;
pub mod tree;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use index::{Index, IndexStore, Point, Source};
pub use reindex::{RebuildReport, ReindexEngine};
pub use service::IndexService;
pub use tree::{ComponentTree, MemoryTree};
