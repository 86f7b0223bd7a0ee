//! Station trees shared by the reindex and service tests

use crate::core::error::{Error, Result};
use crate::tree::{
    AttrValue, ComponentTree, MemoryTree, NodeId, NodeSpec, TypeInfo, BOOLEAN_WRITABLE, DEVICE,
    ENUM_POINT, ENUM_WRITABLE, NUMERIC_POINT, NUMERIC_WRITABLE, POINT_DEVICE_EXT,
};

/// Small station: one BACnet device with three points, a logic folder with
/// two, an unsupported string point and an excluded security point.
///
/// 16 nodes, 2 sources, 5 points.
pub fn station() -> MemoryTree {
    let mut tree = MemoryTree::new();
    tree.define_type("bacnet:BacnetNetwork", &[]);
    tree.define_type("bacnet:BacnetDevice", &[DEVICE]);
    tree.define_type("bacnet:BacnetPointDeviceExt", &[POINT_DEVICE_EXT]);

    for spec in [
        NodeSpec::new("h:1", "", "baja:Station"),
        NodeSpec::new("h:2", "Drivers", "baja:Folder").parent("h:1"),
        NodeSpec::new("h:3", "BacnetNetwork", "bacnet:BacnetNetwork").parent("h:2"),
        NodeSpec::new("h:4", "AHU$201", "bacnet:BacnetDevice").parent("h:3"),
        NodeSpec::new("h:5", "points", "bacnet:BacnetPointDeviceExt").parent("h:4"),
        NodeSpec::new("h:6", "Supply$20Temp", NUMERIC_POINT)
            .parent("h:5")
            .facet("units", "°F")
            .attr("out", AttrValue::Number(55.2)),
        NodeSpec::new("h:7", "FanCmd", BOOLEAN_WRITABLE)
            .parent("h:5")
            .attr("out", AttrValue::Bool(true)),
        NodeSpec::new("h:8", "Mode", ENUM_WRITABLE)
            .parent("h:5")
            .facet("units", "null")
            .facet("range", "{off=0,heat=1,cool=2}"),
        NodeSpec::new("h:9", "Note", "control:StringPoint").parent("h:5"),
        NodeSpec::new("h:a", "Logic", "baja:Folder").parent("h:1"),
        NodeSpec::new("h:b", "Setpoint", NUMERIC_WRITABLE)
            .parent("h:a")
            .display_name("Zone Setpoint")
            .facet("units", "%"),
        NodeSpec::new("h:c", "Occ", ENUM_POINT).parent("h:a"),
        NodeSpec::new("h:d", "Services", "baja:Folder").parent("h:1"),
        NodeSpec::new("h:e", "SecurityService", "baja:Folder").parent("h:d"),
        NodeSpec::new("h:10", "Users", "baja:Folder").parent("h:e"),
        NodeSpec::new("h:f", "Lockouts", NUMERIC_POINT).parent("h:10"),
    ] {
        if let Err(e) = tree.insert(spec) {
            panic!("fixture station is invalid: {}", e);
        }
    }
    tree
}

/// Wraps a tree and fails type lookups for selected nodes
pub struct FaultyTree {
    pub inner: MemoryTree,
    pub bad: Vec<NodeId>,
    pub fail_enumeration: bool,
}

impl FaultyTree {
    pub fn new(inner: MemoryTree) -> Self {
        Self {
            inner,
            bad: Vec::new(),
            fail_enumeration: false,
        }
    }

    pub fn poison(mut self, handle: &str) -> Self {
        if let Some(node) = self.inner.resolve_handle(handle) {
            self.bad.push(node);
        }
        self
    }
}

impl ComponentTree for FaultyTree {
    fn nodes(&self) -> Result<Vec<NodeId>> {
        if self.fail_enumeration {
            return Err(Error::Tree {
                message: "component space unavailable".to_string(),
            });
        }
        self.inner.nodes()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    fn type_info(&self, node: NodeId) -> Result<&TypeInfo> {
        if self.bad.contains(&node) {
            return Err(Error::malformed(node.to_string(), "type not loadable"));
        }
        self.inner.type_info(node)
    }

    fn display_name(&self, node: NodeId) -> Result<String> {
        self.inner.display_name(node)
    }

    fn slot_path(&self, node: NodeId) -> Result<String> {
        self.inner.slot_path(node)
    }

    fn handle(&self, node: NodeId) -> Result<&str> {
        self.inner.handle(node)
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue> {
        self.inner.attr(node, name)
    }

    fn resolve_handle(&self, handle: &str) -> Option<NodeId> {
        self.inner.resolve_handle(handle)
    }
}
