//! In-memory component tree
//!
//! Loaded from a JSON station dump (see `TreeDump`) or assembled node by
//! node. Supertypes come from a builtin table for the control and driver
//! types, extended by the dump's `types` section.
//!
//! @module tree/memory

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::Path;

use super::{
    AttrValue, ComponentTree, NodeId, TypeInfo, BOOLEAN_POINT, BOOLEAN_WRITABLE, CONTROL_POINT,
    ENUM_POINT, ENUM_WRITABLE, NUMERIC_POINT, NUMERIC_WRITABLE, SLOT_SCHEME,
};
use crate::core::error::{Error, Result};
use crate::point::slot_path;

/// Deepest parent chain walked before a node is treated as cyclic
const MAX_DEPTH: usize = 1024;

// =============================================================================
// DUMP FORMAT
// =============================================================================

/// Serialized station tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeDump {
    /// Extra type hierarchy: type name -> direct supertypes
    #[serde(default)]
    pub types: BTreeMap<String, Vec<String>>,
    pub nodes: Vec<NodeSpec>,
}

/// One serialized node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub handle: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl NodeSpec {
    pub fn new(handle: &str, name: &str, type_name: &str) -> Self {
        Self {
            handle: handle.to_string(),
            name: name.to_string(),
            type_name: type_name.to_string(),
            parent: None,
            display_name: None,
            attrs: BTreeMap::new(),
        }
    }

    pub fn parent(mut self, handle: &str) -> Self {
        self.parent = Some(handle.to_string());
        self
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.insert(name.to_string(), value);
        self
    }

    /// Convenience for a `facets` attribute
    pub fn facet(mut self, key: &str, value: &str) -> Self {
        let entry = self
            .attrs
            .entry("facets".to_string())
            .or_insert_with(|| AttrValue::Facets(BTreeMap::new()));
        if let AttrValue::Facets(map) = entry {
            map.insert(key.to_string(), value.to_string());
        }
        self
    }
}

// =============================================================================
// MEMORY TREE
// =============================================================================

#[derive(Debug)]
struct Entry {
    handle: String,
    name: String,
    display_name: Option<String>,
    info: TypeInfo,
    parent: Option<NodeId>,
    attrs: BTreeMap<String, AttrValue>,
}

/// Component tree held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryTree {
    entries: Vec<Entry>,
    by_handle: HashMap<String, NodeId>,
    types: BTreeMap<String, Vec<String>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON dump from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let dump: TreeDump = serde_json::from_str(&content)?;
        Self::from_dump(dump)
    }

    /// Build from a dump; node order in the dump does not matter
    pub fn from_dump(dump: TreeDump) -> Result<Self> {
        let mut tree = Self {
            types: dump.types,
            ..Self::default()
        };

        // Pass 1: allocate ids
        for spec in &dump.nodes {
            let id = NodeId(tree.entries.len());
            if tree.by_handle.insert(spec.handle.clone(), id).is_some() {
                return Err(Error::Tree {
                    message: format!("duplicate handle {}", spec.handle),
                });
            }
            let info = tree.type_info_for(&spec.type_name);
            tree.entries.push(Entry {
                handle: spec.handle.clone(),
                name: spec.name.clone(),
                display_name: spec.display_name.clone(),
                info,
                parent: None,
                attrs: spec.attrs.clone(),
            });
        }

        // Pass 2: link parents
        for (idx, spec) in dump.nodes.iter().enumerate() {
            if let Some(parent) = &spec.parent {
                let parent_id = tree.lookup_parent(parent)?;
                tree.entries[idx].parent = Some(parent_id);
            }
        }

        Ok(tree)
    }

    /// Add one node; its parent must already be present
    pub fn insert(&mut self, spec: NodeSpec) -> Result<NodeId> {
        if self.by_handle.contains_key(&spec.handle) {
            return Err(Error::Tree {
                message: format!("duplicate handle {}", spec.handle),
            });
        }
        let parent = match &spec.parent {
            Some(p) => Some(self.lookup_parent(p)?),
            None => None,
        };

        let id = NodeId(self.entries.len());
        let info = self.type_info_for(&spec.type_name);
        self.by_handle.insert(spec.handle.clone(), id);
        self.entries.push(Entry {
            handle: spec.handle,
            name: spec.name,
            display_name: spec.display_name,
            info,
            parent,
            attrs: spec.attrs,
        });
        Ok(id)
    }

    /// Register direct supertypes for a type; affects nodes inserted afterwards
    pub fn define_type(&mut self, name: &str, supers: &[&str]) {
        self.types.insert(
            name.to_string(),
            supers.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup_parent(&self, handle: &str) -> Result<NodeId> {
        self.by_handle
            .get(handle)
            .copied()
            .ok_or_else(|| Error::Tree {
                message: format!("unknown parent handle {}", handle),
            })
    }

    fn entry(&self, node: NodeId) -> Result<&Entry> {
        self.entries
            .get(node.0)
            .ok_or_else(|| Error::malformed(node.to_string(), "node not in tree"))
    }

    /// Resolve the transitive supertypes of `name`
    fn type_info_for(&self, name: &str) -> TypeInfo {
        let mut supers = Vec::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<String> = self.direct_supers(name).into();
        while let Some(next) = queue.pop_front() {
            if next == name || !seen.insert(next.clone()) {
                continue;
            }
            queue.extend(self.direct_supers(&next));
            supers.push(next);
        }
        TypeInfo::new(name, supers)
    }

    fn direct_supers(&self, name: &str) -> Vec<String> {
        if let Some(s) = self.types.get(name) {
            return s.clone();
        }
        builtin_supers(name).iter().map(|s| s.to_string()).collect()
    }
}

fn builtin_supers(name: &str) -> &'static [&'static str] {
    match name {
        NUMERIC_WRITABLE => &[NUMERIC_POINT],
        BOOLEAN_WRITABLE => &[BOOLEAN_POINT],
        ENUM_WRITABLE => &[ENUM_POINT],
        "control:StringWritable" => &["control:StringPoint"],
        NUMERIC_POINT | BOOLEAN_POINT | ENUM_POINT | "control:StringPoint" => &[CONTROL_POINT],
        _ => &[],
    }
}

impl ComponentTree for MemoryTree {
    fn nodes(&self) -> Result<Vec<NodeId>> {
        Ok((0..self.entries.len()).map(NodeId).collect())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entries.get(node.0).and_then(|e| e.parent)
    }

    fn type_info(&self, node: NodeId) -> Result<&TypeInfo> {
        Ok(&self.entry(node)?.info)
    }

    fn display_name(&self, node: NodeId) -> Result<String> {
        let entry = self.entry(node)?;
        Ok(match &entry.display_name {
            Some(name) => name.clone(),
            None => slot_path::unescape(&entry.name),
        })
    }

    fn slot_path(&self, node: NodeId) -> Result<String> {
        let mut names = Vec::new();
        let mut current = node;
        loop {
            let entry = self.entry(current)?;
            match entry.parent {
                // The root contributes no segment
                None => break,
                Some(parent) => {
                    names.push(entry.name.as_str());
                    current = parent;
                }
            }
            if names.len() > MAX_DEPTH {
                return Err(Error::malformed(node.to_string(), "parent chain is cyclic"));
            }
        }
        names.reverse();
        Ok(format!("{}/{}", SLOT_SCHEME, names.join("/")))
    }

    fn handle(&self, node: NodeId) -> Result<&str> {
        Ok(&self.entry(node)?.handle)
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue> {
        self.entries.get(node.0).and_then(|e| e.attrs.get(name))
    }

    fn resolve_handle(&self, handle: &str) -> Option<NodeId> {
        self.by_handle.get(handle).copied()
    }
}
