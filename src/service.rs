//! Point index service
//!
//! Hosts the engine for a station: rebuilds once at steady state, exposes a
//! parameterless fire-and-forget rebuild action, and serves the read and
//! write-back boundary used by the API layer.

use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::index::{IndexStore, Point, Snapshot, Source};
use crate::point::ids;
use crate::reindex::{RebuildEvents, RebuildReport, ReindexEngine};
use crate::tree::{AttrValue, ComponentTree, NodeId};

/// Attribute holding a point's live value
const VALUE_ATTR: &str = "out";

pub struct IndexService {
    config: Config,
    tree: Arc<dyn ComponentTree>,
    engine: Arc<ReindexEngine>,
}

impl IndexService {
    pub fn new(config: Config, tree: Arc<dyn ComponentTree>) -> Self {
        let events = RebuildEvents::new(config.service.events_capacity);
        let engine = ReindexEngine::new(Arc::new(IndexStore::new()), &config.index)
            .with_events(events);
        Self {
            config,
            tree,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &Arc<ReindexEngine> {
        &self.engine
    }

    pub fn store(&self) -> &Arc<IndexStore> {
        self.engine.store()
    }

    pub fn allow_write(&self) -> bool {
        self.config.service.allow_write
    }

    /// Host reached steady state: build the first index, then report ready
    pub fn at_steady_state(&self) -> Option<RebuildReport> {
        let report = if self.config.service.rebuild_on_steady_state {
            self.rebuild_now().ok()
        } else {
            None
        };
        info!(version = env!("CARGO_PKG_VERSION"), "Point index service ready");
        report
    }

    /// Rebuild synchronously on the calling thread
    pub fn rebuild_now(&self) -> Result<RebuildReport> {
        self.engine.rebuild(self.tree.as_ref())
    }

    /// Administrative action: start a rebuild and return immediately.
    ///
    /// Runs on tokio's blocking pool when called inside a runtime, otherwise
    /// on a dedicated thread. Completion is visible only through logs, the
    /// event channel, or the index counts.
    pub fn rebuild_index(&self) {
        let engine = Arc::clone(&self.engine);
        let tree = Arc::clone(&self.tree);
        let job = move || {
            // Outcome is already logged and broadcast by the engine
            let _ = engine.rebuild(tree.as_ref());
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let _ = handle.spawn_blocking(job);
            }
            Err(_) => {
                if let Err(e) = std::thread::Builder::new()
                    .name("station-reindex".to_string())
                    .spawn(job)
                {
                    warn!(error = %e, "Failed to spawn reindex thread");
                }
            }
        }
    }

    // =========================================================================
    // READ BOUNDARY
    // =========================================================================

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store().snapshot()
    }

    pub fn lookup_source(&self, id: &str) -> Option<Source> {
        self.store().lookup_source(id)
    }

    pub fn lookup_point(&self, source_id: &str, addr: &str) -> Option<Point> {
        self.store().lookup_point(source_id, addr)
    }

    pub fn lookup_point_by_id(&self, id: &str) -> Option<Point> {
        self.store().lookup_point_by_id(id)
    }

    pub fn source_count(&self) -> usize {
        self.store().source_count()
    }

    pub fn point_count(&self) -> usize {
        self.store().point_count()
    }

    /// Current value of a point, if the node still exposes one
    pub fn read_value(&self, point: &Point) -> Option<AttrValue> {
        let node = self.tree.resolve_handle(&point.node)?;
        self.tree.attr(node, VALUE_ATTR).cloned()
    }

    // =========================================================================
    // WRITE-BACK BOUNDARY
    // =========================================================================

    /// Resolve a point id back to its tree node
    pub fn write_target(&self, point_id: &str) -> Result<NodeId> {
        let handle = ids::handle_for_point_id(point_id)?;
        self.tree
            .resolve_handle(&handle)
            .ok_or(Error::NodeNotFound { handle })
    }

    /// Resolve a source id back to its device or folder node
    pub fn source_target(&self, source_id: &str) -> Result<NodeId> {
        let handle = ids::handle_for_source_id(source_id);
        self.tree
            .resolve_handle(&handle)
            .ok_or(Error::NodeNotFound { handle })
    }
}
