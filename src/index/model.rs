//! Index data model
//!
//! Index owns its Sources, each Source owns its Points. Points and Sources
//! refer back to their tree node by handle only.
//!
//! @module index/model

use serde::Serialize;
use std::collections::HashMap;

use crate::core::error::{Error, Result};
use crate::point::PointKind;

// =============================================================================
// POINT
// =============================================================================

/// One indexed data point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: String,
    pub name: String,
    /// Address relative to the owning source
    pub addr: String,
    pub kind: PointKind,
    /// Ordinal names, multi-state kinds only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enums: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Handle of the originating node
    #[serde(skip)]
    pub node: String,
}

// =============================================================================
// SOURCE
// =============================================================================

/// A device or equipment grouping of points
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    /// Escape-decoded absolute path
    pub path: String,
    /// Raw slot path, used to derive point addresses
    #[serde(skip)]
    pub slot_path: String,
    #[serde(skip)]
    pub node: String,
    points: HashMap<String, Point>,
}

impl Source {
    pub fn new(id: String, name: String, path: String, slot_path: String, node: String) -> Self {
        Self {
            id,
            name,
            path,
            slot_path,
            node,
            points: HashMap::new(),
        }
    }

    /// Insert a point by address; returns the point it displaced, if any
    pub fn add_point(&mut self, point: Point) -> Option<Point> {
        self.points.insert(point.addr.clone(), point)
    }

    pub fn point(&self, addr: &str) -> Option<&Point> {
        self.points.get(addr)
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

// =============================================================================
// INDEX
// =============================================================================

/// Two-level catalog: source id -> Source -> addr -> Point
#[derive(Debug, Clone, Default)]
pub struct Index {
    sources: HashMap<String, Source>,
    /// point id -> (source id, addr)
    point_ids: HashMap<String, (String, String)>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only ever called on a build target, never on a published snapshot
    pub fn clear(&mut self) {
        self.sources.clear();
        self.point_ids.clear();
    }

    /// Add a source, replacing any source with the same id
    pub fn add_source(&mut self, source: Source) {
        if let Some(old) = self.sources.remove(&source.id) {
            for point in old.points() {
                self.point_ids.remove(&point.id);
            }
        }
        for point in source.points() {
            self.point_ids
                .insert(point.id.clone(), (source.id.clone(), point.addr.clone()));
        }
        self.sources.insert(source.id.clone(), source);
    }

    /// Add a point to an existing source; returns the point it displaced
    pub fn add_point(&mut self, source_id: &str, point: Point) -> Result<Option<Point>> {
        let source = self
            .sources
            .get_mut(source_id)
            .ok_or_else(|| Error::malformed(point.node.clone(), format!("unknown source {}", source_id)))?;

        let key = (source_id.to_string(), point.addr.clone());
        let id = point.id.clone();
        let displaced = source.add_point(point);
        if let Some(old) = &displaced {
            self.point_ids.remove(&old.id);
        }
        self.point_ids.insert(id, key);
        Ok(displaced)
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    pub fn point(&self, source_id: &str, addr: &str) -> Option<&Point> {
        self.sources.get(source_id)?.point(addr)
    }

    pub fn point_by_id(&self, id: &str) -> Option<(&Source, &Point)> {
        let (source_id, addr) = self.point_ids.get(id)?;
        let source = self.sources.get(source_id)?;
        Some((source, source.point(addr)?))
    }

    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn num_points(&self) -> usize {
        self.sources.values().map(Source::num_points).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
