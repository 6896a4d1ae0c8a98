//! Node wrapper: a canonically named handle onto one host object.

use indexmap::IndexMap;
use log::debug;
use std::fmt;

use rigkit_api_core::{AttrPath, AttrValue};
use rigkit_scene_core::{NodeHandle, Plug, SceneError, SceneGraph};

use crate::attr_type::{AttrSpec, AttrType, Attribute};
use crate::naming::{self, NodeType, Side};
use crate::{attributes, Result, RigConfig, RigContext, RigError};

/// A node is unbound until [`Node::bind`] creates its host object; a bound
/// node never goes back. Deleting the host object is not observed here: the
/// next operation on the node fails with [`RigError::HostSync`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    node_type: NodeType,
    side: Option<Side>,
    handle: Option<NodeHandle>,
    added_attributes: IndexMap<String, Attribute>,
}

impl Node {
    /// Resolve the canonical name without touching the scene.
    pub fn new(
        config: &RigConfig,
        node_type: impl Into<NodeType>,
        name: &str,
        side: Option<&str>,
    ) -> Result<Self> {
        let node_type = node_type.into();
        let resolved = naming::resolve(config, &node_type, name, side)?;
        Ok(Self {
            name: resolved.name,
            node_type,
            side: resolved.side,
            handle: None,
            added_attributes: IndexMap::new(),
        })
    }

    /// Resolve the name and create the host object in one step.
    pub fn create<S: SceneGraph>(
        ctx: &mut RigContext<S>,
        node_type: impl Into<NodeType>,
        name: &str,
        side: Option<&str>,
    ) -> Result<Self> {
        let mut node = Self::new(&ctx.config, node_type, name, side)?;
        node.bind(ctx)?;
        Ok(node)
    }

    /// Wrap an existing host object. Used for nodes found rather than made.
    pub(crate) fn from_existing(name: String, node_type: NodeType, handle: NodeHandle) -> Self {
        Self {
            name,
            node_type,
            side: None,
            handle: Some(handle),
            added_attributes: IndexMap::new(),
        }
    }

    /// Create the host object. The host may uniquify the name on collision;
    /// the node adopts whatever name the host reports.
    pub fn bind<S: SceneGraph>(&mut self, ctx: &mut RigContext<S>) -> Result<NodeHandle> {
        if self.handle.is_some() {
            return Err(RigError::config(format!(
                "node '{}' is already bound",
                self.name
            )));
        }
        let handle = ctx
            .scene
            .create_node(self.node_type.primitive(), &self.name)?;
        let actual = ctx.scene.node_name(handle)?;
        if actual != self.name {
            debug!("node '{}' was created as '{actual}'", self.name);
            self.name = actual;
        }
        debug!(
            "created {} node '{}' ({})",
            self.node_type,
            self.name,
            self.node_type.primitive()
        );
        self.handle = Some(handle);
        Ok(handle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn handle(&self) -> Option<NodeHandle> {
        self.handle
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    pub fn added_attributes(&self) -> &IndexMap<String, Attribute> {
        &self.added_attributes
    }

    pub fn attribute(&self, attr_name: &str) -> Option<&Attribute> {
        self.added_attributes.get(attr_name)
    }

    pub(crate) fn is_header(&self, attr_name: &str) -> bool {
        self.attribute(attr_name)
            .is_some_and(|a| a.semantic_type == AttrType::Header)
    }

    pub(crate) fn record_attribute(&mut self, attribute: Attribute) {
        self.added_attributes
            .insert(attribute.attr_name.clone(), attribute);
    }

    /// Handle of the host object, checked against the scene.
    pub fn live_handle<S: SceneGraph>(&self, scene: &S) -> Result<NodeHandle> {
        match self.handle {
            Some(handle) if scene.exists(handle) => Ok(handle),
            _ => Err(RigError::HostSync {
                node: self.name.clone(),
            }),
        }
    }

    /// Scene plug for one of this node's attributes.
    pub fn plug<S: SceneGraph>(&self, scene: &S, attr_name: &str) -> Result<Plug> {
        Ok(Plug::new(self.live_handle(scene)?, attr_name))
    }

    /// `name.attr` text path for one of this node's attributes.
    pub fn attr_path(&self, attr_name: &str) -> AttrPath {
        AttrPath::new(self.name.clone(), attr_name)
    }

    /// A new, independently bound node of the same logical type. Only the
    /// type carries over: `new_name` is used without a side prefix, and
    /// attributes and connections are not copied.
    pub fn duplicate<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        new_name: &str,
    ) -> Result<Node> {
        Node::create(ctx, self.node_type.clone(), new_name, None)
    }

    /// Re-parent under `parent`, or to the scene root with `None`.
    pub fn set_parent<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        parent_node: Option<&Node>,
    ) -> Result<()> {
        let child = self.live_handle(&ctx.scene)?;
        let parent = match parent_node {
            Some(p) => Some(p.live_handle(&ctx.scene)?),
            None => None,
        };
        let nodes: Vec<&Node> = std::iter::once(self).chain(parent_node).collect();
        ctx.scene
            .set_parent(child, parent)
            .map_err(attributes::host_err(&nodes))?;
        Ok(())
    }

    pub fn add_attr<S: SceneGraph>(
        &mut self,
        ctx: &mut RigContext<S>,
        spec: &AttrSpec,
    ) -> Result<Attribute> {
        attributes::add(ctx, self, spec)
    }

    pub fn get_attr<S: SceneGraph>(&self, ctx: &RigContext<S>, attr_name: &str) -> Result<AttrValue> {
        attributes::get(ctx, self, attr_name)
    }

    pub fn attr_set<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        attr_name: &str,
        value: impl Into<AttrValue>,
    ) -> Result<()> {
        attributes::set(ctx, self, attr_name, value.into())
    }

    /// Connect one of this node's attributes into `target`, a `node.attr`
    /// path naming any node in the scene.
    pub fn connect_attr<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        attr_name: &str,
        target: &str,
        force: bool,
    ) -> Result<()> {
        let path = AttrPath::parse(target).map_err(RigError::config)?;
        let target_handle = ctx
            .scene
            .find_node(&path.node)
            .ok_or(SceneError::NodeNotFound {
                name: path.node.clone(),
            })?;
        let src = self.plug(&ctx.scene, attr_name)?;
        let dst = Plug::new(target_handle, path.attr);
        attributes::connect_plugs(ctx, &src, &dst, force, &[self])?;
        Ok(())
    }

    /// Lock and un-key; `show` falls back to the configured default.
    pub fn attr_lock<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        attr_names: &[&str],
        show: Option<bool>,
    ) -> Result<()> {
        let show = show.unwrap_or(ctx.config.lock_show);
        attributes::lock(ctx, self, attr_names, show)
    }

    /// Unlock and make keyable; `show` falls back to the configured default.
    pub fn attr_unlock<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        attr_names: &[&str],
        show: Option<bool>,
    ) -> Result<()> {
        let show = show.unwrap_or(ctx.config.unlock_show);
        attributes::unlock(ctx, self, attr_names, show)
    }

    /// Set keyable, lock and inspector visibility together.
    pub fn attr_state<S: SceneGraph>(
        &self,
        ctx: &mut RigContext<S>,
        attr_names: &[&str],
        keyable: bool,
        lock: bool,
        show: bool,
    ) -> Result<()> {
        attributes::set_state(ctx, self, attr_names, keyable, lock, show)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
