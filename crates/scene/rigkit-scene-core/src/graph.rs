//! The `SceneGraph` trait: everything the rigging layer consumes from a host.

use serde::{Deserialize, Serialize};

use rigkit_api_core::AttrValue;

use crate::{AttrDefinition, AttrFlags, AttrState, NodeHandle, SceneResult};

/// A `(node, attribute)` pair addressed by handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plug {
    pub node: NodeHandle,
    pub attr: String,
}

impl Plug {
    pub fn new(node: NodeHandle, attr: impl Into<String>) -> Self {
        Self {
            node,
            attr: attr.into(),
        }
    }
}

/// Host scene graph.
///
/// All calls are synchronous. Implementations report a deleted node as
/// `SceneError::StaleHandle` from any call that receives its handle.
pub trait SceneGraph {
    /// Create a node of the host primitive type. When `name` is taken the host
    /// picks a unique variant; read it back with [`SceneGraph::node_name`].
    fn create_node(&mut self, primitive: &str, name: &str) -> SceneResult<NodeHandle>;

    fn find_node(&self, name: &str) -> Option<NodeHandle>;

    /// Return the node called `name`, creating it when absent. The boolean is
    /// `true` when a node was created.
    ///
    /// This is one exclusive call so no other creation can interleave between
    /// the lookup and the creation.
    fn find_or_create_node(
        &mut self,
        primitive: &str,
        name: &str,
    ) -> SceneResult<(NodeHandle, bool)> {
        if let Some(handle) = self.find_node(name) {
            return Ok((handle, false));
        }
        self.create_node(primitive, name).map(|h| (h, true))
    }

    fn exists(&self, node: NodeHandle) -> bool;

    fn node_name(&self, node: NodeHandle) -> SceneResult<String>;

    fn node_primitive(&self, node: NodeHandle) -> SceneResult<String>;

    /// Remove a node and every connection touching it.
    fn delete_node(&mut self, node: NodeHandle) -> SceneResult<()>;

    fn set_parent(&mut self, child: NodeHandle, parent: Option<NodeHandle>) -> SceneResult<()>;

    fn parent_of(&self, node: NodeHandle) -> SceneResult<Option<NodeHandle>>;

    fn add_attr(&mut self, node: NodeHandle, def: &AttrDefinition) -> SceneResult<()>;

    /// Remove a custom attribute and every connection touching it.
    fn remove_attr(&mut self, node: NodeHandle, attr: &str) -> SceneResult<()>;

    fn has_attr(&self, node: NodeHandle, attr: &str) -> SceneResult<bool>;

    fn attr_state(&self, node: NodeHandle, attr: &str) -> SceneResult<AttrState>;

    fn get_attr(&self, node: NodeHandle, attr: &str) -> SceneResult<AttrValue>;

    fn set_attr(&mut self, node: NodeHandle, attr: &str, value: AttrValue) -> SceneResult<()>;

    fn set_attr_flags(&mut self, node: NodeHandle, attr: &str, flags: AttrFlags)
        -> SceneResult<()>;

    /// Connect `src` into `dst`. With `force` an existing driver of `dst` is
    /// replaced and returned; without it a driven `dst` is an error.
    fn connect(&mut self, src: &Plug, dst: &Plug, force: bool) -> SceneResult<Option<Plug>>;

    fn disconnect(&mut self, src: &Plug, dst: &Plug) -> SceneResult<()>;

    /// The plug currently driving `dst`, if any.
    fn driver_of(&self, dst: &Plug) -> SceneResult<Option<Plug>>;
}
