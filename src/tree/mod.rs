//! Component tree contract
//!
//! The station's object model is consumed only through this narrow,
//! read-only traversal and attribute-access trait. `MemoryTree` is the
//! in-process implementation used by the CLI and the tests.
//!
//! @module tree

pub mod memory;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::error::Result;

pub use memory::{MemoryTree, NodeSpec, TreeDump};

// =============================================================================
// TYPE NAMES
// =============================================================================

pub const CONTROL_POINT: &str = "control:ControlPoint";
pub const NUMERIC_POINT: &str = "control:NumericPoint";
pub const NUMERIC_WRITABLE: &str = "control:NumericWritable";
pub const BOOLEAN_POINT: &str = "control:BooleanPoint";
pub const BOOLEAN_WRITABLE: &str = "control:BooleanWritable";
pub const ENUM_POINT: &str = "control:EnumPoint";
pub const ENUM_WRITABLE: &str = "control:EnumWritable";
pub const DEVICE: &str = "driver:Device";
pub const POINT_DEVICE_EXT: &str = "driver:PointDeviceExt";

/// Scheme prefix carried by every raw slot path
pub const SLOT_SCHEME: &str = "slot:";

/// Scheme prefix carried by every handle string
pub const HANDLE_SCHEME: &str = "h:";

// =============================================================================
// NODE TYPES
// =============================================================================

/// Opaque reference to a node, valid for the tree that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node's concrete type and every supertype it inherits from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub supers: Vec<String>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, supers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            supers,
        }
    }

    /// True if this type is `type_name` or inherits from it
    pub fn is(&self, type_name: &str) -> bool {
        self.name == type_name || self.supers.iter().any(|s| s == type_name)
    }
}

/// Named attribute value on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Facets(BTreeMap<String, String>),
}

impl AttrValue {
    pub fn as_facets(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Facets(f) => Some(f),
            _ => None,
        }
    }
}

// =============================================================================
// TREE CONTRACT
// =============================================================================

/// Read-only view of the station's component tree
///
/// Accessors are fallible so a single malformed node can be reported and
/// skipped without aborting a rebuild. `nodes` failing is fatal for a rebuild.
pub trait ComponentTree: Send + Sync {
    /// Enumerate every node in the tree
    fn nodes(&self) -> Result<Vec<NodeId>>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn type_info(&self, node: NodeId) -> Result<&TypeInfo>;

    fn display_name(&self, node: NodeId) -> Result<String>;

    /// Raw slot path, e.g. `slot:/Drivers/Net$20A/Dev1`
    fn slot_path(&self, node: NodeId) -> Result<String>;

    /// Tree-wide stable handle, e.g. `h:2f1a`
    fn handle(&self, node: NodeId) -> Result<&str>;

    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue>;

    /// Inverse of `handle`
    fn resolve_handle(&self, handle: &str) -> Option<NodeId>;

    /// Identity used in diagnostics; never fails
    fn describe(&self, node: NodeId) -> String {
        match (self.display_name(node), self.slot_path(node)) {
            (Ok(name), Ok(path)) => format!("{} [{}]", name, path),
            (Ok(name), Err(_)) => name,
            _ => node.to_string(),
        }
    }
}
