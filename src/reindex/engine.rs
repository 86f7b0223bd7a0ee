//! Reindex engine
//!
//! Walks every node of the tree once, turns each point into an indexed
//! Point under its resolved Source, and publishes the finished Index.
//!
//! Each node is evaluated to a `NodeOutcome`; a failure in one node is
//! recorded and the walk continues. Only a failure to enumerate the tree
//! aborts a rebuild, in which case nothing is published.
//!
//! @module reindex/engine

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

use super::events::{RebuildEvent, RebuildEvents};
use super::resolver::{Resolution, SourceResolver};
use crate::core::config::IndexConfig;
use crate::core::error::{Error, Result};
use crate::index::{Index, IndexStore, Point};
use crate::point::{classify, enum_range, ids, point_addr, Classification};
use crate::tree::{AttrValue, ComponentTree, NodeId};

// =============================================================================
// OUTCOMES
// =============================================================================

/// Why a node was left out of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotAPoint,
    UnsupportedControl,
    NoParent,
    Excluded,
}

/// Result of processing one node
#[derive(Debug)]
pub enum NodeOutcome {
    Indexed {
        source_id: String,
        addr: String,
        /// Id of a point previously stored under the same address
        displaced: Option<String>,
    },
    Skipped(SkipReason),
    Failed(Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub not_a_point: usize,
    pub unsupported_control: usize,
    pub no_parent: usize,
    pub excluded: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NotAPoint => self.not_a_point += 1,
            SkipReason::UnsupportedControl => self.unsupported_control += 1,
            SkipReason::NoParent => self.no_parent += 1,
            SkipReason::Excluded => self.excluded += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.not_a_point + self.unsupported_control + self.no_parent + self.excluded
    }
}

/// A node that failed to index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeError {
    pub node: String,
    pub message: String,
}

/// Summary of one rebuild
#[derive(Debug, Clone, Default, Serialize)]
pub struct RebuildReport {
    /// Generation of the published snapshot, 0 until published
    pub generation: u64,
    pub elapsed_ms: f64,
    pub nodes: usize,
    pub sources: usize,
    pub points: usize,
    /// Points inserted, including ones later overwritten
    pub indexed: usize,
    pub collisions: usize,
    pub skipped: SkipCounts,
    pub errors: Vec<NodeError>,
}

// =============================================================================
// ENGINE STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunStatus {
    Completed(RebuildReport),
    Failed { error: String },
}

/// Record of the most recent finished rebuild
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
}

// =============================================================================
// ENGINE
// =============================================================================

/// Rebuilds the point index and publishes it to an `IndexStore`.
///
/// Only one rebuild runs at a time; a second trigger while one is running
/// is rejected with `Error::RebuildInProgress`.
pub struct ReindexEngine {
    store: Arc<IndexStore>,
    exclude_prefixes: Vec<String>,
    events: RebuildEvents,
    running: Mutex<()>,
    last_run: RwLock<Option<RunRecord>>,
}

impl ReindexEngine {
    pub fn new(store: Arc<IndexStore>, config: &IndexConfig) -> Self {
        Self {
            store,
            exclude_prefixes: config.exclude_prefixes.clone(),
            events: RebuildEvents::default(),
            running: Mutex::new(()),
            last_run: RwLock::new(None),
        }
    }

    pub fn with_events(mut self, events: RebuildEvents) -> Self {
        self.events = events;
        self
    }

    pub fn store(&self) -> &Arc<IndexStore> {
        &self.store
    }

    pub fn events(&self) -> &RebuildEvents {
        &self.events
    }

    pub fn state(&self) -> EngineState {
        if self.running.is_locked() {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    pub fn last_run(&self) -> Option<RunRecord> {
        self.last_run.read().clone()
    }

    /// Rebuild the index from `tree` and publish it
    pub fn rebuild(&self, tree: &dyn ComponentTree) -> Result<RebuildReport> {
        let Some(_running) = self.running.try_lock() else {
            warn!("Reindex requested while another reindex is running; rejected");
            self.events.broadcast(RebuildEvent::Rejected);
            return Err(Error::RebuildInProgress);
        };

        info!("Reindex started");
        self.events.broadcast(RebuildEvent::Started);
        let started_at = Utc::now();
        let start = Instant::now();

        match self.build(tree) {
            Ok((index, mut report)) => {
                report.generation = self.store.publish(index);
                report.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

                info!(
                    elapsed_ms = report.elapsed_ms,
                    sources = report.sources,
                    points = report.points,
                    errors = report.errors.len(),
                    generation = report.generation,
                    "Reindex complete"
                );
                self.events.broadcast(RebuildEvent::Completed {
                    generation: report.generation,
                    sources: report.sources,
                    points: report.points,
                    errors: report.errors.len(),
                    duration_ms: report.elapsed_ms,
                });
                self.record(started_at, RunStatus::Completed(report.clone()));
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Reindex FAILED; previous index remains current");
                self.events.broadcast(RebuildEvent::Failed {
                    error: e.to_string(),
                });
                self.record(
                    started_at,
                    RunStatus::Failed {
                        error: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Walk `tree` into a fresh Index without publishing it
    pub fn build(&self, tree: &dyn ComponentTree) -> Result<(Index, RebuildReport)> {
        let nodes = tree.nodes()?;

        let mut index = Index::new();
        let resolver = SourceResolver::new(tree, &self.exclude_prefixes);
        let mut report = RebuildReport {
            nodes: nodes.len(),
            ..RebuildReport::default()
        };

        for node in nodes {
            match self.process_node(tree, &resolver, node, &mut index) {
                NodeOutcome::Indexed {
                    source_id,
                    addr,
                    displaced,
                } => {
                    report.indexed += 1;
                    if let Some(old) = displaced {
                        report.collisions += 1;
                        debug!(source = %source_id, addr = %addr, replaced = %old, "Address collision");
                    }
                }
                NodeOutcome::Skipped(reason) => report.skipped.record(reason),
                NodeOutcome::Failed(e) => {
                    let who = tree.describe(node);
                    error!(node = %who, error = %e, "FAILED to index node");
                    report.errors.push(NodeError {
                        node: who,
                        message: e.to_string(),
                    });
                }
            }
        }

        trace!(nodes = report.nodes, "Total nodes searched");
        report.sources = index.num_sources();
        report.points = index.num_points();
        Ok((index, report))
    }

    /// Classify, resolve and insert one node
    pub fn process_node(
        &self,
        tree: &dyn ComponentTree,
        resolver: &SourceResolver<'_>,
        node: NodeId,
        index: &mut Index,
    ) -> NodeOutcome {
        match index_point(tree, resolver, node, index) {
            Ok(outcome) => outcome,
            Err(e) => NodeOutcome::Failed(e),
        }
    }

    fn record(&self, started_at: DateTime<Utc>, status: RunStatus) {
        *self.last_run.write() = Some(RunRecord {
            started_at,
            finished_at: Utc::now(),
            status,
        });
    }
}

fn index_point(
    tree: &dyn ComponentTree,
    resolver: &SourceResolver<'_>,
    node: NodeId,
    index: &mut Index,
) -> Result<NodeOutcome> {
    let kind = match classify(tree.type_info(node)?) {
        Classification::Point(kind) => kind,
        Classification::Unsupported => {
            trace!(node = %tree.describe(node), "Unsupported point");
            return Ok(NodeOutcome::Skipped(SkipReason::UnsupportedControl));
        }
        Classification::NotAPoint => return Ok(NodeOutcome::Skipped(SkipReason::NotAPoint)),
    };

    let source_id = match resolver.resolve(node, index)? {
        Resolution::Source(id) => id,
        Resolution::NoParent => {
            trace!(node = %tree.describe(node), "Source not found for point");
            return Ok(NodeOutcome::Skipped(SkipReason::NoParent));
        }
        Resolution::Excluded => return Ok(NodeOutcome::Skipped(SkipReason::Excluded)),
    };

    let handle = tree.handle(node)?;
    let source_slot_path = index
        .source(&source_id)
        .map(|s| s.slot_path.clone())
        .ok_or_else(|| Error::malformed(handle, format!("source {} vanished", source_id)))?;
    let addr = point_addr(kind, &source_slot_path, &tree.slot_path(node)?)?;

    let facets = tree.attr(node, "facets").and_then(AttrValue::as_facets);
    let unit = facets
        .and_then(|f| f.get("units"))
        .filter(|u| !u.is_empty() && u.as_str() != "null")
        .cloned();
    let enums = if kind.is_multi_state() {
        enum_range::parse(facets.and_then(|f| f.get("range")).map(String::as_str))
    } else {
        None
    };

    let point = Point {
        id: ids::point_id(handle)?,
        name: tree.display_name(node)?,
        addr: addr.clone(),
        kind,
        enums,
        unit,
        node: handle.to_string(),
    };
    let displaced = index.add_point(&source_id, point)?.map(|old| old.id);

    Ok(NodeOutcome::Indexed {
        source_id,
        addr,
        displaced,
    })
}
