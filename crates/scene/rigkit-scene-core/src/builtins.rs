//! Built-in attributes carried by host primitive types.
//!
//! Only the primitives the rigging layer creates are covered; unknown
//! primitives start with no attributes.

use rigkit_api_core::{AttrValue, HostAttrKind};

use crate::AttrState;

/// One built-in attribute: name, initial state and initial value.
#[derive(Debug, Clone)]
pub struct BuiltinAttr {
    pub name: String,
    pub state: AttrState,
    pub value: AttrValue,
}

const AXES: [&str; 3] = ["X", "Y", "Z"];

fn state(kind: HostAttrKind, keyable: bool) -> AttrState {
    AttrState {
        kind,
        min: None,
        max: None,
        enum_labels: Vec::new(),
        nice_name: None,
        keyable,
        locked: false,
        channel_box: false,
        hidden: false,
    }
}

fn double(name: impl Into<String>, default: f64) -> BuiltinAttr {
    BuiltinAttr {
        name: name.into(),
        state: state(HostAttrKind::Double, true),
        value: AttrValue::Double(default),
    }
}

/// Computed outputs: readable and connectable, never keyed.
fn output(name: impl Into<String>) -> BuiltinAttr {
    BuiltinAttr {
        name: name.into(),
        state: state(HostAttrKind::Double, false),
        value: AttrValue::Double(0.0),
    }
}

fn operation(labels: &[&str], default: u32) -> BuiltinAttr {
    let mut st = state(HostAttrKind::Enum, true);
    st.enum_labels = labels.iter().map(|s| s.to_string()).collect();
    BuiltinAttr {
        name: "operation".to_string(),
        state: st,
        value: AttrValue::Enum(default),
    }
}

fn per_axis(prefix: &str, default: f64, out: &mut Vec<BuiltinAttr>) {
    for ax in AXES {
        out.push(double(format!("{prefix}{ax}"), default));
    }
}

/// Built-in attributes for `primitive`, in declaration order.
pub fn builtin_attrs(primitive: &str) -> Vec<BuiltinAttr> {
    let mut attrs = Vec::new();
    match primitive {
        "transform" | "joint" => {
            per_axis("translate", 0.0, &mut attrs);
            per_axis("rotate", 0.0, &mut attrs);
            per_axis("scale", 1.0, &mut attrs);
            attrs.push(BuiltinAttr {
                name: "visibility".to_string(),
                state: state(HostAttrKind::Bool, true),
                value: AttrValue::Bool(true),
            });
            if primitive == "joint" {
                attrs.push(double("radius", 1.0));
            }
        }
        "reverse" => {
            per_axis("input", 0.0, &mut attrs);
            attrs.extend(AXES.iter().map(|ax| output(format!("output{ax}"))));
        }
        "multiplyDivide" => {
            attrs.push(operation(&["No operation", "Multiply", "Divide", "Power"], 1));
            per_axis("input1", 0.0, &mut attrs);
            per_axis("input2", 1.0, &mut attrs);
            attrs.extend(AXES.iter().map(|ax| output(format!("output{ax}"))));
        }
        "plusMinusAverage" => {
            attrs.push(operation(&["No operation", "Sum", "Subtract", "Average"], 1));
            attrs.push(double("input1D0", 0.0));
            attrs.push(double("input1D1", 0.0));
            attrs.push(output("output1D"));
        }
        "condition" => {
            attrs.push(operation(
                &[
                    "Equal",
                    "Not Equal",
                    "Greater Than",
                    "Greater or Equal",
                    "Less Than",
                    "Less or Equal",
                ],
                0,
            ));
            attrs.push(double("firstTerm", 0.0));
            attrs.push(double("secondTerm", 0.0));
            attrs.push(double("colorIfTrueR", 0.0));
            attrs.push(double("colorIfFalseR", 1.0));
            attrs.push(output("outColorR"));
        }
        "clamp" => {
            attrs.push(double("inputR", 0.0));
            attrs.push(double("minR", 0.0));
            attrs.push(double("maxR", 0.0));
            attrs.push(output("outputR"));
        }
        "remapValue" => {
            attrs.push(double("inputValue", 0.0));
            attrs.push(double("inputMin", 0.0));
            attrs.push(double("inputMax", 1.0));
            attrs.push(double("outputMin", 0.0));
            attrs.push(double("outputMax", 1.0));
            attrs.push(output("outValue"));
        }
        _ => {}
    }
    attrs
}
