//! In-memory scene graph host.
//!
//! Mirrors the behavior the rigging layer relies on from a real host:
//! name uniquification on collision, built-in attributes per primitive,
//! lock and range enforcement on writes, and single-driver destinations.

use hashbrown::HashMap;
use indexmap::IndexMap;
use log::debug;

use rigkit_api_core::{coercion, AttrValue, HostAttrKind};

use crate::builtins::builtin_attrs;
use crate::{
    AttrDefinition, AttrFlags, AttrState, HandleAllocator, NodeHandle, Plug, SceneError,
    SceneGraph, SceneResult,
};

#[derive(Debug, Clone)]
struct AttrRecord {
    state: AttrState,
    value: AttrValue,
}

#[derive(Debug, Clone)]
struct NodeRecord {
    name: String,
    primitive: String,
    parent: Option<NodeHandle>,
    attrs: IndexMap<String, AttrRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: HashMap<NodeHandle, NodeRecord>,
    names: HashMap<String, NodeHandle>,
    // destination -> driver
    drivers: HashMap<Plug, Plug>,
    ids: HandleAllocator,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Handles of every node of the given primitive type, in creation order.
    pub fn nodes_of_primitive(&self, primitive: &str) -> Vec<NodeHandle> {
        let mut found: Vec<NodeHandle> = self
            .nodes
            .iter()
            .filter(|(_, rec)| rec.primitive == primitive)
            .map(|(h, _)| *h)
            .collect();
        found.sort();
        found
    }

    pub fn connection_count(&self) -> usize {
        self.drivers.len()
    }

    /// Every plug currently driven by `src`.
    pub fn destinations_of(&self, src: &Plug) -> Vec<Plug> {
        let mut out: Vec<Plug> = self
            .drivers
            .iter()
            .filter(|(_, driver)| *driver == src)
            .map(|(dst, _)| dst.clone())
            .collect();
        out.sort_by(|a, b| (a.node, &a.attr).cmp(&(b.node, &b.attr)));
        out
    }

    /// Attribute names on a node, built-ins first, then custom ones in the
    /// order they were added.
    pub fn attr_names(&self, node: NodeHandle) -> SceneResult<Vec<String>> {
        Ok(self.node(node)?.attrs.keys().cloned().collect())
    }

    fn node(&self, handle: NodeHandle) -> SceneResult<&NodeRecord> {
        self.nodes
            .get(&handle)
            .ok_or(SceneError::StaleHandle { handle })
    }

    fn node_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut NodeRecord> {
        self.nodes
            .get_mut(&handle)
            .ok_or(SceneError::StaleHandle { handle })
    }

    fn attr(&self, handle: NodeHandle, attr: &str) -> SceneResult<&AttrRecord> {
        let rec = self.node(handle)?;
        rec.attrs.get(attr).ok_or_else(|| SceneError::AttrNotFound {
            node: rec.name.clone(),
            attr: attr.to_string(),
        })
    }

    fn attr_mut(&mut self, handle: NodeHandle, attr: &str) -> SceneResult<&mut AttrRecord> {
        let rec = self.node_mut(handle)?;
        let node_name = rec.name.clone();
        rec.attrs
            .get_mut(attr)
            .ok_or_else(|| SceneError::AttrNotFound {
                node: node_name,
                attr: attr.to_string(),
            })
    }

    fn plug_label(&self, plug: &Plug) -> String {
        match self.nodes.get(&plug.node) {
            Some(rec) => format!("{}.{}", rec.name, plug.attr),
            None => format!("{}.{}", plug.node, plug.attr),
        }
    }

    /// `name` if free, otherwise the first free `{stem}{n}` where `stem` is
    /// `name` without trailing digits.
    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains_key(name) {
            return name.to_string();
        }
        let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
        let stem = if stem.is_empty() { name } else { stem };
        let mut n: u64 = 1;
        loop {
            let candidate = format!("{stem}{n}");
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn check_value(
        node: &str,
        attr: &str,
        state: &AttrState,
        value: AttrValue,
    ) -> SceneResult<AttrValue> {
        let stored =
            coercion::coerce_to_kind(value, state.kind).ok_or_else(|| SceneError::KindMismatch {
                node: node.to_string(),
                attr: attr.to_string(),
                expected: state.kind,
                value,
            })?;
        let numeric = stored.as_f64();
        let (min, max) = match state.kind {
            HostAttrKind::Enum => (
                Some(0.0),
                Some(state.enum_labels.len().saturating_sub(1) as f64),
            ),
            _ => (state.min, state.max),
        };
        let in_range = min.map_or(true, |m| numeric >= m) && max.map_or(true, |m| numeric <= m);
        if !in_range {
            return Err(SceneError::OutOfRange {
                node: node.to_string(),
                attr: attr.to_string(),
                value: numeric,
                min,
                max,
            });
        }
        Ok(stored)
    }
}

impl SceneGraph for MemoryScene {
    fn create_node(&mut self, primitive: &str, name: &str) -> SceneResult<NodeHandle> {
        let requested = if name.is_empty() {
            format!("{primitive}1")
        } else {
            name.to_string()
        };
        let final_name = self.unique_name(&requested);
        let handle = self.ids.alloc();
        let attrs = builtin_attrs(primitive)
            .into_iter()
            .map(|b| {
                (
                    b.name,
                    AttrRecord {
                        state: b.state,
                        value: b.value,
                    },
                )
            })
            .collect();
        self.nodes.insert(
            handle,
            NodeRecord {
                name: final_name.clone(),
                primitive: primitive.to_string(),
                parent: None,
                attrs,
            },
        );
        self.names.insert(final_name.clone(), handle);
        debug!("scene: created {primitive} '{final_name}' as {handle}");
        Ok(handle)
    }

    fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    fn exists(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(&node)
    }

    fn node_name(&self, node: NodeHandle) -> SceneResult<String> {
        Ok(self.node(node)?.name.clone())
    }

    fn node_primitive(&self, node: NodeHandle) -> SceneResult<String> {
        Ok(self.node(node)?.primitive.clone())
    }

    fn delete_node(&mut self, node: NodeHandle) -> SceneResult<()> {
        let rec = self
            .nodes
            .remove(&node)
            .ok_or(SceneError::StaleHandle { handle: node })?;
        self.names.remove(&rec.name);
        self.drivers
            .retain(|dst, src| dst.node != node && src.node != node);
        for other in self.nodes.values_mut() {
            if other.parent == Some(node) {
                other.parent = None;
            }
        }
        debug!("scene: deleted '{}'", rec.name);
        Ok(())
    }

    fn set_parent(&mut self, child: NodeHandle, parent: Option<NodeHandle>) -> SceneResult<()> {
        let child_name = self.node(child)?.name.clone();
        if let Some(p) = parent {
            let parent_name = self.node(p)?.name.clone();
            let mut cursor = Some(p);
            while let Some(current) = cursor {
                if current == child {
                    return Err(SceneError::ParentCycle {
                        child: child_name,
                        parent: parent_name,
                    });
                }
                cursor = self.node(current)?.parent;
            }
        }
        self.node_mut(child)?.parent = parent;
        Ok(())
    }

    fn parent_of(&self, node: NodeHandle) -> SceneResult<Option<NodeHandle>> {
        Ok(self.node(node)?.parent)
    }

    fn add_attr(&mut self, node: NodeHandle, def: &AttrDefinition) -> SceneResult<()> {
        let rec = self.node(node)?;
        if def.name.is_empty() {
            return Err(SceneError::InvalidDefinition {
                reason: "attribute name is empty".to_string(),
            });
        }
        if rec.attrs.contains_key(&def.name) {
            return Err(SceneError::AttrExists {
                node: rec.name.clone(),
                attr: def.name.clone(),
            });
        }
        if def.kind == HostAttrKind::Enum && def.enum_labels.is_empty() {
            return Err(SceneError::InvalidDefinition {
                reason: format!("enum attribute '{}' has no labels", def.name),
            });
        }
        if let (Some(min), Some(max)) = (def.min, def.max) {
            if min > max {
                return Err(SceneError::InvalidDefinition {
                    reason: format!("min {min} is greater than max {max} on '{}'", def.name),
                });
            }
        }
        let state = AttrState {
            kind: def.kind,
            min: def.min,
            max: def.max,
            enum_labels: def.enum_labels.clone(),
            nice_name: def.nice_name.clone(),
            keyable: def.keyable,
            locked: false,
            channel_box: false,
            hidden: def.hidden,
        };
        let value = Self::check_value(&rec.name, &def.name, &state, def.default)?;
        let rec = self.node_mut(node)?;
        rec.attrs
            .insert(def.name.clone(), AttrRecord { state, value });
        Ok(())
    }

    fn remove_attr(&mut self, node: NodeHandle, attr: &str) -> SceneResult<()> {
        let rec = self.node(node)?;
        self.attr(node, attr)?;
        if builtin_attrs(&rec.primitive).iter().any(|b| b.name == attr) {
            return Err(SceneError::BuiltinRemoval {
                node: rec.name.clone(),
                attr: attr.to_string(),
            });
        }
        self.node_mut(node)?.attrs.shift_remove(attr);
        self.drivers.retain(|dst, src| {
            !(dst.node == node && dst.attr == attr) && !(src.node == node && src.attr == attr)
        });
        Ok(())
    }

    fn has_attr(&self, node: NodeHandle, attr: &str) -> SceneResult<bool> {
        Ok(self.node(node)?.attrs.contains_key(attr))
    }

    fn attr_state(&self, node: NodeHandle, attr: &str) -> SceneResult<AttrState> {
        Ok(self.attr(node, attr)?.state.clone())
    }

    fn get_attr(&self, node: NodeHandle, attr: &str) -> SceneResult<AttrValue> {
        Ok(self.attr(node, attr)?.value)
    }

    fn set_attr(&mut self, node: NodeHandle, attr: &str, value: AttrValue) -> SceneResult<()> {
        let node_name = self.node(node)?.name.clone();
        let record = self.attr(node, attr)?;
        if record.state.locked {
            return Err(SceneError::AttrLocked {
                node: node_name,
                attr: attr.to_string(),
            });
        }
        let stored = Self::check_value(&node_name, attr, &record.state, value)?;
        self.attr_mut(node, attr)?.value = stored;
        Ok(())
    }

    fn set_attr_flags(
        &mut self,
        node: NodeHandle,
        attr: &str,
        flags: AttrFlags,
    ) -> SceneResult<()> {
        let state = &mut self.attr_mut(node, attr)?.state;
        if let Some(keyable) = flags.keyable {
            state.keyable = keyable;
        }
        if let Some(locked) = flags.locked {
            state.locked = locked;
        }
        if let Some(channel_box) = flags.channel_box {
            state.channel_box = channel_box;
        }
        Ok(())
    }

    fn connect(&mut self, src: &Plug, dst: &Plug, force: bool) -> SceneResult<Option<Plug>> {
        self.attr(src.node, &src.attr)?;
        let dst_state = &self.attr(dst.node, &dst.attr)?.state;
        if dst_state.locked {
            return Err(SceneError::AttrLocked {
                node: self.node(dst.node)?.name.clone(),
                attr: dst.attr.clone(),
            });
        }
        if let Some(existing) = self.drivers.get(dst) {
            if !force {
                return Err(SceneError::AlreadyConnected {
                    destination: self.plug_label(dst),
                    driver: self.plug_label(existing),
                });
            }
        }
        debug!(
            "scene: connect {} -> {}",
            self.plug_label(src),
            self.plug_label(dst)
        );
        Ok(self.drivers.insert(dst.clone(), src.clone()))
    }

    fn disconnect(&mut self, src: &Plug, dst: &Plug) -> SceneResult<()> {
        match self.drivers.get(dst) {
            Some(driver) if driver == src => {
                self.drivers.remove(dst);
                Ok(())
            }
            _ => Err(SceneError::NotConnected {
                destination: self.plug_label(dst),
                driver: self.plug_label(src),
            }),
        }
    }

    fn driver_of(&self, dst: &Plug) -> SceneResult<Option<Plug>> {
        self.attr(dst.node, &dst.attr)?;
        Ok(self.drivers.get(dst).cloned())
    }
}
