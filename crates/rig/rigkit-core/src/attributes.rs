//! Attribute operations on bound nodes.
//!
//! Compound operations (per-axis lock/unlock, multi-attribute link) are
//! all-or-nothing: when one step fails the steps already applied are undone
//! before the error is returned.

use log::{debug, warn};

use rigkit_api_core::{coercion, AttrValue};
use rigkit_scene_core::{AttrFlags, NodeHandle, Plug, SceneError, SceneGraph, SceneResult};

use crate::attr_type::{self, AttrSpec, AttrType, Attribute};
use crate::routing::{self, RoutingKind, UtilityNode};
use crate::{Node, Result, RigContext, RigError};

const AXES: [&str; 3] = ["X", "Y", "Z"];

/// Expand compound names into per-axis attributes.
///
/// `t`/`translate`, `r`/`rotate` and `s`/`scale` become their X, Y and Z
/// components; every other name is kept as given.
pub fn expand_attrs(attr_names: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(attr_names.len());
    for name in attr_names {
        let group = match *name {
            "t" | "translate" => Some("translate"),
            "r" | "rotate" => Some("rotate"),
            "s" | "scale" => Some("scale"),
            _ => None,
        };
        match group {
            Some(g) => out.extend(AXES.iter().map(|ax| format!("{g}{ax}"))),
            None => out.push(name.to_string()),
        }
    }
    out
}

/// Host error conversion that reports a stale handle under the name of the
/// node it belongs to.
pub(crate) fn host_err<'a>(nodes: &'a [&'a Node]) -> impl Fn(SceneError) -> RigError + 'a {
    move |err| match err {
        SceneError::StaleHandle { handle } => RigError::HostSync {
            node: nodes
                .iter()
                .find(|n| n.handle() == Some(handle))
                .map_or_else(|| handle.to_string(), |n| n.name().to_string()),
        },
        other => other.into(),
    }
}

/// Create a custom attribute on `node` and record its metadata.
pub fn add<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &mut Node,
    spec: &AttrSpec,
) -> Result<Attribute> {
    let resolved = attr_type::resolve(spec)?;
    let handle = node.live_handle(&ctx.scene)?;
    let attr_name = resolved.attribute.attr_name.as_str();

    let exists_on_host = ctx
        .scene
        .has_attr(handle, attr_name)
        .map_err(host_err(&[&*node]))?;
    if node.attribute(attr_name).is_some() || exists_on_host {
        return Err(RigError::AttributeExists {
            node: node.name().to_string(),
            attr: attr_name.to_string(),
        });
    }

    ctx.scene
        .add_attr(handle, &resolved.definition)
        .map_err(host_err(&[&*node]))?;
    if resolved.force_channel_box {
        let shown =
            ctx.scene
                .set_attr_flags(handle, attr_name, AttrFlags::default().channel_box(true));
        if let Err(err) = shown {
            warn!(
                "showing '{}.{}' failed ({err}); removing it again",
                node.name(),
                attr_name
            );
            if let Err(undo) = ctx.scene.remove_attr(handle, attr_name) {
                warn!("could not remove '{}.{}': {undo}", node.name(), attr_name);
            }
            return Err(host_err(&[&*node])(err));
        }
    }
    debug!(
        "added {} attribute '{}.{}'",
        resolved.attribute.semantic_type,
        node.name(),
        attr_name
    );
    node.record_attribute(resolved.attribute.clone());
    Ok(resolved.attribute)
}

/// Current value of an attribute.
///
/// Declared attributes come back in their semantic form: `bool` as
/// `AttrValue::Bool`, `enum`/`header` as `AttrValue::Enum(label index)`,
/// `long` as `Long`, `float`/`slider` as `Double`. Built-in attributes are
/// returned exactly as the host stores them.
pub fn get<S: SceneGraph>(ctx: &RigContext<S>, node: &Node, attr_name: &str) -> Result<AttrValue> {
    let handle = node.live_handle(&ctx.scene)?;
    let raw = ctx
        .scene
        .get_attr(handle, attr_name)
        .map_err(host_err(&[node]))?;
    let Some(declared) = node.attribute(attr_name) else {
        return Ok(raw);
    };
    let value = match declared.semantic_type {
        AttrType::Bool => AttrValue::Bool(coercion::to_bool(raw)),
        AttrType::Enum | AttrType::Header => {
            AttrValue::Enum(coercion::to_integral(raw).unwrap_or(0).max(0) as u32)
        }
        AttrType::Long => AttrValue::Long(coercion::to_integral(raw).unwrap_or(0)),
        AttrType::Float | AttrType::Slider => AttrValue::Double(raw.as_f64()),
    };
    Ok(value)
}

/// Write an attribute. Locked attributes and out-of-range values are
/// rejected and leave the stored value untouched.
pub fn set<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_name: &str,
    value: AttrValue,
) -> Result<()> {
    let handle = node.live_handle(&ctx.scene)?;
    let state = ctx
        .scene
        .attr_state(handle, attr_name)
        .map_err(host_err(&[node]))?;
    if state.locked {
        return Err(RigError::LockedAttribute {
            node: node.name().to_string(),
            attr: attr_name.to_string(),
        });
    }
    let numeric = value.as_f64();
    if !state.in_range(numeric) {
        return Err(RigError::Range {
            node: node.name().to_string(),
            attr: attr_name.to_string(),
            value: numeric,
            min: state.min,
            max: state.max,
        });
    }
    ctx.scene
        .set_attr(handle, attr_name, value)
        .map_err(host_err(&[node]))?;
    Ok(())
}

/// Lock, un-key and set inspector visibility of every named attribute.
pub fn lock<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_names: &[&str],
    show: bool,
) -> Result<()> {
    set_state(ctx, node, attr_names, false, true, show)
}

/// Unlock, make keyable and set inspector visibility of every named attribute.
pub fn unlock<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_names: &[&str],
    show: bool,
) -> Result<()> {
    set_state(ctx, node, attr_names, true, false, show)
}

/// Apply keyable/lock/visibility to every expanded attribute, rolling back on
/// the first failure. Header attributes are labels and are left untouched.
pub fn set_state<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_names: &[&str],
    keyable: bool,
    lock: bool,
    show: bool,
) -> Result<()> {
    let handle = node.live_handle(&ctx.scene)?;
    let mut applied: Vec<(String, AttrFlags)> = Vec::new();

    for name in expand_attrs(attr_names) {
        if node.is_header(&name) {
            debug!("skipping header '{}.{}'", node.name(), name);
            continue;
        }
        let flags = AttrFlags::default()
            .keyable(keyable)
            .locked(lock)
            .channel_box(show);
        match apply_flags(&mut ctx.scene, handle, &name, flags).map_err(host_err(&[node])) {
            Ok(previous) => applied.push((name, previous)),
            Err(err) => {
                warn!(
                    "state change on '{}.{}' failed ({err}); restoring {} attribute(s)",
                    node.name(),
                    name,
                    applied.len()
                );
                for (done, previous) in applied.iter().rev() {
                    if let Err(undo) = ctx.scene.set_attr_flags(handle, done, *previous) {
                        warn!("could not restore '{}.{}': {undo}", node.name(), done);
                    }
                }
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Set flags and return the ones needed to restore the previous state.
fn apply_flags<S: SceneGraph>(
    scene: &mut S,
    handle: NodeHandle,
    attr_name: &str,
    flags: AttrFlags,
) -> SceneResult<AttrFlags> {
    let previous = scene.attr_state(handle, attr_name)?.flags();
    scene.set_attr_flags(handle, attr_name, flags)?;
    Ok(previous)
}

/// Connect two plugs, returning the driver that `force` displaced.
pub(crate) fn connect_plugs<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    src: &Plug,
    dst: &Plug,
    force: bool,
    nodes: &[&Node],
) -> Result<Option<Plug>> {
    let replaced = ctx
        .scene
        .connect(src, dst, force)
        .map_err(host_err(nodes))?;
    if let Some(previous) = &replaced {
        debug!(
            "forced connection into {}.{} replaced driver {}.{}",
            dst.node, dst.attr, previous.node, previous.attr
        );
    }
    Ok(replaced)
}

/// Drive each named attribute of `target` from the same attribute on `node`.
pub fn link<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_names: &[&str],
    target: &Node,
    force: bool,
) -> Result<()> {
    let src_handle = node.live_handle(&ctx.scene)?;
    let dst_handle = target.live_handle(&ctx.scene)?;
    let mut made: Vec<(Plug, Plug, Option<Plug>)> = Vec::new();

    for name in expand_attrs(attr_names) {
        let src = Plug::new(src_handle, name.as_str());
        let dst = Plug::new(dst_handle, name.as_str());
        match connect_plugs(ctx, &src, &dst, force, &[node, target]) {
            Ok(replaced) => made.push((src, dst, replaced)),
            Err(err) => {
                warn!(
                    "link {} -> {} failed on '{name}' ({err}); undoing {} connection(s)",
                    node,
                    target,
                    made.len()
                );
                undo_connections(&mut ctx.scene, made);
                return Err(err);
            }
        }
    }
    debug!("linked {:?} from '{}' to '{}'", attr_names, node, target);
    Ok(())
}

fn undo_connections<S: SceneGraph>(scene: &mut S, made: Vec<(Plug, Plug, Option<Plug>)>) {
    for (src, dst, replaced) in made.into_iter().rev() {
        if let Err(err) = scene.disconnect(&src, &dst) {
            warn!("could not undo connection into {}.{}: {err}", dst.node, dst.attr);
            continue;
        }
        if let Some(previous) = replaced {
            if let Err(err) = scene.connect(&previous, &dst, true) {
                warn!("could not restore driver of {}.{}: {err}", dst.node, dst.attr);
            }
        }
    }
}

/// Direct connection `node.attr_name -> target.target_attr`.
pub fn connect<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_name: &str,
    target: &Node,
    target_attr: &str,
    force: bool,
) -> Result<()> {
    let src = node.plug(&ctx.scene, attr_name)?;
    let dst = target.plug(&ctx.scene, target_attr)?;
    connect_plugs(ctx, &src, &dst, force, &[node, target])?;
    Ok(())
}

/// Connection routed through the inverter of `node.attr_name` (`1 - x`).
pub fn connect_inverted<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_name: &str,
    target: &Node,
    target_attr: &str,
    force: bool,
) -> Result<UtilityNode> {
    routing::route(ctx, node, attr_name, target, target_attr, force, RoutingKind::Invert)
}

/// Connection routed through the negator of `node.attr_name` (`-x`).
pub fn connect_negated<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    node: &Node,
    attr_name: &str,
    target: &Node,
    target_attr: &str,
    force: bool,
) -> Result<UtilityNode> {
    routing::route(ctx, node, attr_name, target, target_attr, force, RoutingKind::Negate)
}
