//! Source resolution
//!
//! A point's source is normally its parent node. Points sitting in a
//! device's point extension are promoted one level up to the device itself.
//! The Index under construction doubles as the per-rebuild source cache.
//!
//! @module reindex/resolver

use tracing::trace;

use crate::core::error::{Error, Result};
use crate::index::{Index, Source};
use crate::point::{ids, slot_path};
use crate::tree::{ComponentTree, NodeId, DEVICE, POINT_DEVICE_EXT, SLOT_SCHEME};

/// Outcome of resolving one point's source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Id of the (possibly newly created) source in the index
    Source(String),
    NoParent,
    /// Source lives under an excluded path prefix
    Excluded,
}

pub struct SourceResolver<'a> {
    tree: &'a dyn ComponentTree,
    exclude_prefixes: &'a [String],
}

impl<'a> SourceResolver<'a> {
    pub fn new(tree: &'a dyn ComponentTree, exclude_prefixes: &'a [String]) -> Self {
        Self {
            tree,
            exclude_prefixes,
        }
    }

    /// Resolve the source for `point`, creating and caching it in `index`
    pub fn resolve(&self, point: NodeId, index: &mut Index) -> Result<Resolution> {
        let Some(parent) = self.tree.parent(point) else {
            return Ok(Resolution::NoParent);
        };

        let node = self.find_source_node(parent)?;
        let handle = self.tree.handle(node)?;
        let id = ids::source_id(handle)?;

        if index.source(&id).is_some() {
            return Ok(Resolution::Source(id));
        }

        let raw = self.tree.slot_path(node)?;
        let path = decoded_path(&raw).ok_or_else(|| {
            Error::malformed(handle, format!("slot path {} lacks {}", raw, SLOT_SCHEME))
        })?;

        if self.is_excluded(&path) {
            trace!(path = %path, "Source excluded");
            return Ok(Resolution::Excluded);
        }

        let name = self.tree.display_name(node)?;
        index.add_source(Source::new(id.clone(), name, path, raw, handle.to_string()));
        Ok(Resolution::Source(id))
    }

    /// Walk up from a point extension to its device, otherwise stay put
    pub fn find_source_node(&self, parent: NodeId) -> Result<NodeId> {
        let Some(grandparent) = self.tree.parent(parent) else {
            return Ok(parent);
        };

        if self.tree.type_info(parent)?.is(POINT_DEVICE_EXT)
            && self.tree.type_info(grandparent)?.is(DEVICE)
        {
            return Ok(grandparent);
        }

        Ok(parent)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// Absolute, escape-decoded path from a raw slot path
pub fn decoded_path(slot_path: &str) -> Option<String> {
    slot_path
        .strip_prefix(SLOT_SCHEME)
        .map(slot_path::unescape)
}
