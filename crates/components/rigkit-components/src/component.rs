//! Component trait and the control builder behind it.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use rigkit_core::{AttrSpec, Node, NodeType, RigContext, Side};
use rigkit_scene_core::SceneGraph;

use crate::{ComponentError, ComponentResult};

const TRANSFORM_ATTRS: [&str; 6] = [
    "translateX",
    "translateY",
    "translateZ",
    "rotateX",
    "rotateY",
    "rotateZ",
];

/// One control of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlSpec {
    pub name: String,
    pub side: Side,
    /// Curve shape label. Kept with the data; not drawn.
    pub shape: String,
    /// Translate XYZ then rotate XYZ.
    pub position: [f64; 6],
    /// Name of a control declared earlier in the same component. `None`
    /// parents the control under the component group.
    #[serde(default)]
    pub parent: Option<String>,
}

impl ControlSpec {
    pub fn new(name: impl Into<String>, side: Side, shape: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            side,
            shape: shape.into(),
            position: [0.0; 6],
            parent: None,
        }
    }

    pub fn position(mut self, position: [f64; 6]) -> Self {
        self.position = position;
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Parse a JSON array of controls.
    pub fn list_from_json(s: &str) -> ComponentResult<Vec<Self>> {
        serde_json::from_str(s).map_err(|e| ComponentError::InvalidData {
            reason: e.to_string(),
        })
    }
}

/// Nodes produced by [`Component::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltComponent {
    pub group: Node,
    /// Keyed by control name, in declaration order.
    pub controls: IndexMap<String, Node>,
}

impl BuiltComponent {
    pub fn control(&self, name: &str) -> Option<&Node> {
        self.controls.get(name)
    }
}

pub trait Component {
    fn name(&self) -> &str;

    fn side(&self) -> Side;

    fn controls(&self) -> Vec<ControlSpec>;

    /// Create the `{side}_{name}_GRP` group and every control under it.
    fn build<S: SceneGraph>(&self, ctx: &mut RigContext<S>) -> ComponentResult<BuiltComponent> {
        build_controls(ctx, self.name(), self.side(), &self.controls())
    }
}

/// A component described entirely by data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentData {
    pub name: String,
    pub side: Side,
    pub controls: Vec<ControlSpec>,
}

impl Component for ComponentData {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn controls(&self) -> Vec<ControlSpec> {
        self.controls.clone()
    }
}

fn validate(controls: &[ControlSpec]) -> ComponentResult<()> {
    let mut seen: Vec<&str> = Vec::with_capacity(controls.len());
    for spec in controls {
        if seen.contains(&spec.name.as_str()) {
            return Err(ComponentError::DuplicateControl {
                control: spec.name.clone(),
            });
        }
        if let Some(parent) = &spec.parent {
            if !seen.contains(&parent.as_str()) {
                return Err(ComponentError::UnknownParent {
                    control: spec.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        if spec.position.iter().any(|v| !v.is_finite()) {
            return Err(ComponentError::InvalidData {
                reason: format!("control '{}' has a non-finite position", spec.name),
            });
        }
        seen.push(&spec.name);
    }
    Ok(())
}

/// Build a controls group named after `name` and `side`, then each control.
///
/// Control data is checked before anything is created. A failure while
/// building leaves the nodes created so far in the scene.
pub fn build_controls<S: SceneGraph>(
    ctx: &mut RigContext<S>,
    name: &str,
    side: Side,
    controls: &[ControlSpec],
) -> ComponentResult<BuiltComponent> {
    validate(controls)?;

    let group = Node::create(
        ctx,
        NodeType::Transform,
        &format!("{name}_GRP"),
        Some(side.tag()),
    )?;
    let mut built: IndexMap<String, Node> = IndexMap::with_capacity(controls.len());

    for spec in controls {
        let mut ctl = Node::create(ctx, NodeType::Control, &spec.name, Some(spec.side.tag()))?;
        for (attr, value) in TRANSFORM_ATTRS.iter().zip(spec.position) {
            ctl.attr_set(ctx, attr, value)?;
        }

        let parent = match &spec.parent {
            Some(p) => built.get(p).ok_or_else(|| ComponentError::UnknownParent {
                control: spec.name.clone(),
                parent: p.clone(),
            })?,
            None => &group,
        };
        ctl.set_parent(ctx, Some(parent))?;

        ctl.add_attr(ctx, &AttrSpec::header(spec.name.to_uppercase()))?;
        ctl.attr_lock(ctx, &["s", "visibility"], None)?;
        debug!(
            "built control '{}' ({}) under '{}'",
            ctl.name(),
            spec.shape,
            parent.name()
        );
        built.insert(spec.name.clone(), ctl);
    }

    Ok(BuiltComponent {
        group,
        controls: built,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_must_come_first() {
        let controls = vec![
            ControlSpec::new("chest", Side::M, "circle").parent("hips"),
            ControlSpec::new("hips", Side::M, "circle"),
        ];
        assert_eq!(
            validate(&controls),
            Err(ComponentError::UnknownParent {
                control: "chest".into(),
                parent: "hips".into(),
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let controls = vec![
            ControlSpec::new("fk", Side::L, "circle"),
            ControlSpec::new("fk", Side::R, "circle"),
        ];
        assert!(matches!(
            validate(&controls),
            Err(ComponentError::DuplicateControl { .. })
        ));
    }

    #[test]
    fn position_must_be_finite() {
        let controls = vec![ControlSpec::new("a", Side::M, "cube").position([
            0.0,
            f64::NAN,
            0.0,
            0.0,
            0.0,
            0.0,
        ])];
        assert_eq!(validate(&controls).unwrap_err().category(), "control_data");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ControlSpec::list_from_json(
            r#"[{"name":"a","side":"M","shape":"cube","position":[0,0,0,0,0,0],"color":1}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidData { .. }));
    }
}
