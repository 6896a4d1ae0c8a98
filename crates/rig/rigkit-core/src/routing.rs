//! Signal routing through memoized utility nodes.
//!
//! A utility node is named `{source node}_{source attr}_{suffix}`. That name
//! is its identity: one exists per (source node, source attribute, kind),
//! and every routed connection from the same source shares it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use rigkit_api_core::AttrValue;
use rigkit_scene_core::{NodeHandle, Plug, SceneGraph, SceneResult};

use crate::attributes::{connect_plugs, host_err};
use crate::naming::NodeType;
use crate::{Node, Result, RigConfig, RigContext};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingKind {
    /// `1 - x` through a reverse node
    Invert,
    /// `-x` through a multiply node with a factor of -1
    Negate,
}

impl RoutingKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            RoutingKind::Invert => NodeType::Reverse,
            RoutingKind::Negate => NodeType::Multiply,
        }
    }

    pub fn input_attr(&self) -> &'static str {
        match self {
            RoutingKind::Invert => "inputX",
            RoutingKind::Negate => "input1X",
        }
    }

    pub fn output_attr(&self) -> &'static str {
        "outputX"
    }

    pub fn suffix<'a>(&self, config: &'a RigConfig) -> &'a str {
        match self {
            RoutingKind::Invert => &config.inverter_suffix,
            RoutingKind::Negate => &config.negator_suffix,
        }
    }
}

/// Canonical utility node name for a routed source attribute.
pub fn utility_name(
    config: &RigConfig,
    source_node: &str,
    source_attr: &str,
    kind: RoutingKind,
) -> String {
    format!("{source_node}_{source_attr}_{}", kind.suffix(config))
}

/// A utility node returned by the routing builder.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityNode {
    pub node: Node,
    pub kind: RoutingKind,
    /// `false` when an existing node with the canonical name was reused.
    pub created: bool,
}

impl UtilityNode {
    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn output<S: SceneGraph>(&self, scene: &S) -> Result<Plug> {
        self.node.plug(scene, self.kind.output_attr())
    }
}

/// Find or create the utility node for `source.source_attr`.
///
/// An existing node with the canonical name is reused as is; its input is
/// assumed to be wired already. A new node gets its input wired from the
/// source attribute, and the negator its factor of -1. If wiring a new node
/// fails, the node is deleted again before the error is returned.
pub fn find_or_create<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    source: &Node,
    source_attr: &str,
    kind: RoutingKind,
) -> Result<UtilityNode> {
    let src = source.plug(&ctx.scene, source_attr)?;
    ctx.scene
        .attr_state(src.node, source_attr)
        .map_err(host_err(&[source]))?;

    let name = utility_name(&ctx.config, source.name(), source_attr, kind);
    let node_type = kind.node_type();
    let (handle, created) = ctx
        .scene
        .find_or_create_node(node_type.primitive(), &name)?;

    if created {
        let wired = wire_input(&mut ctx.scene, &src, handle, kind);
        if let Err(err) = wired.map_err(host_err(&[source])) {
            if let Err(undo) = ctx.scene.delete_node(handle) {
                warn!("could not remove half-built utility '{name}': {undo}");
            }
            return Err(err);
        }
        debug!("created {kind:?} utility '{name}'");
    } else {
        debug!("reusing {kind:?} utility '{name}'");
    }

    Ok(UtilityNode {
        node: Node::from_existing(name, node_type, handle),
        kind,
        created,
    })
}

fn wire_input<S: SceneGraph>(
    scene: &mut S,
    src: &Plug,
    handle: NodeHandle,
    kind: RoutingKind,
) -> SceneResult<()> {
    if kind == RoutingKind::Negate {
        scene.set_attr(handle, "input2X", AttrValue::Double(-1.0))?;
    }
    scene.connect(src, &Plug::new(handle, kind.input_attr()), false)?;
    Ok(())
}

/// Route `source.source_attr` through its utility node into
/// `target.target_attr`.
pub fn route<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    source: &Node,
    source_attr: &str,
    target: &Node,
    target_attr: &str,
    force: bool,
    kind: RoutingKind,
) -> Result<UtilityNode> {
    let dst = target.plug(&ctx.scene, target_attr)?;
    let utility = find_or_create(ctx, source, source_attr, kind)?;
    let out = utility.output(&ctx.scene)?;
    connect_plugs(ctx, &out, &dst, force, &[&utility.node, target])?;
    Ok(utility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigkit_scene_core::MemoryScene;

    #[test]
    fn names_come_from_the_routed_attribute() {
        let cfg = RigConfig::default();
        assert_eq!(
            utility_name(&cfg, "M_cog", "visibility", RoutingKind::Invert),
            "M_cog_visibility_REV"
        );
        assert_eq!(
            utility_name(&cfg, "L_arm_JNT", "rotateX", RoutingKind::Negate),
            "L_arm_JNT_rotateX_NEG"
        );
    }

    #[test]
    fn negator_gets_factor_and_input() {
        let mut ctx = RigContext::with_scene(MemoryScene::new());
        let src = Node::create(&mut ctx, "transform", "a", None).unwrap();
        let util = find_or_create(&mut ctx, &src, "rotateY", RoutingKind::Negate).unwrap();
        assert!(util.created);
        let h = util.node.handle().unwrap();
        assert_eq!(ctx.scene.node_primitive(h).unwrap(), "multiplyDivide");
        assert_eq!(
            ctx.scene.get_attr(h, "input2X").unwrap(),
            AttrValue::Double(-1.0)
        );
        assert_eq!(
            ctx.scene.driver_of(&Plug::new(h, "input1X")).unwrap(),
            Some(src.plug(&ctx.scene, "rotateY").unwrap())
        );
    }

    #[test]
    fn missing_source_attribute_creates_nothing() {
        let mut ctx = RigContext::with_scene(MemoryScene::new());
        let src = Node::create(&mut ctx, "transform", "a", None).unwrap();
        let before = ctx.scene.node_count();
        assert!(find_or_create(&mut ctx, &src, "nope", RoutingKind::Invert).is_err());
        assert_eq!(ctx.scene.node_count(), before);
    }
}
