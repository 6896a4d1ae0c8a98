//! Canonical node naming.
//!
//! A node name is built from a base name, an optional side tag and the suffix
//! of its logical type:
//!
//!   resolve("joint", "arm", Some("L"))   -> "L_arm_JNT", primitive "joint"
//!   resolve("control", "M_cog", Some("M")) -> "M_cog", primitive "transform"
//!   resolve("nurbsCurve", "shape", None) -> "shape", primitive "nurbsCurve"

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, RigConfig, RigError};

/// Position tag prefixed to node names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left
    L,
    /// Right
    R,
    /// Middle
    M,
    /// Center
    C,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::L, Side::R, Side::M, Side::C];

    pub fn tag(&self) -> &'static str {
        match self {
            Side::L => "L",
            Side::R => "R",
            Side::M => "M",
            Side::C => "C",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Side {
    type Err = RigError;
    fn from_str(s: &str) -> Result<Self> {
        Side::ALL
            .into_iter()
            .find(|side| side.tag() == s)
            .ok_or_else(|| RigError::InvalidSide {
                side: s.to_string(),
                expected: Side::ALL.iter().map(|s| s.tag().to_string()).collect(),
            })
    }
}

/// Logical node category. Anything unrecognized is kept as a raw host
/// primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    // Utility
    Condition,
    Remap,
    Clamp,
    Reverse,
    Multiply,
    Divide,
    Add,
    Subtract,

    // Dag
    Transform,
    Control,
    Joint,

    /// Host primitive passed through unchanged, with no suffix
    Primitive(String),
}

impl NodeType {
    /// Parse a logical type key; never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "condition" => NodeType::Condition,
            "remap" => NodeType::Remap,
            "clamp" => NodeType::Clamp,
            "reverse" => NodeType::Reverse,
            "multiply" => NodeType::Multiply,
            "divide" => NodeType::Divide,
            "add" => NodeType::Add,
            "subtract" | "substract" => NodeType::Subtract,
            "transform" => NodeType::Transform,
            "control" => NodeType::Control,
            "joint" => NodeType::Joint,
            other => NodeType::Primitive(other.to_string()),
        }
    }

    /// The key this type parses from.
    pub fn key(&self) -> &str {
        match self {
            NodeType::Condition => "condition",
            NodeType::Remap => "remap",
            NodeType::Clamp => "clamp",
            NodeType::Reverse => "reverse",
            NodeType::Multiply => "multiply",
            NodeType::Divide => "divide",
            NodeType::Add => "add",
            NodeType::Subtract => "subtract",
            NodeType::Transform => "transform",
            NodeType::Control => "control",
            NodeType::Joint => "joint",
            NodeType::Primitive(p) => p,
        }
    }

    /// Fixed name suffix; transforms and controls take theirs from the name.
    pub fn suffix(&self) -> &'static str {
        match self {
            NodeType::Condition => "_COND",
            NodeType::Remap => "_RMV",
            NodeType::Clamp => "_CLP",
            NodeType::Reverse => "_REV",
            NodeType::Multiply => "_MUL",
            NodeType::Divide => "_DIV",
            NodeType::Add => "_ADD",
            NodeType::Subtract => "_SUB",
            NodeType::Transform | NodeType::Control => "",
            NodeType::Joint => "_JNT",
            NodeType::Primitive(_) => "",
        }
    }

    /// Host primitive type instantiated for this logical type.
    pub fn primitive(&self) -> &str {
        match self {
            NodeType::Condition => "condition",
            NodeType::Remap => "remapValue",
            NodeType::Clamp => "clamp",
            NodeType::Reverse => "reverse",
            NodeType::Multiply | NodeType::Divide => "multiplyDivide",
            NodeType::Add | NodeType::Subtract => "plusMinusAverage",
            NodeType::Transform | NodeType::Control => "transform",
            NodeType::Joint => "joint",
            NodeType::Primitive(p) => p,
        }
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        NodeType::parse(s)
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        NodeType::parse(&s)
    }
}

impl From<NodeType> for String {
    fn from(t: NodeType) -> Self {
        t.key().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub primitive: String,
    pub side: Option<Side>,
}

/// Validate a side tag against the configured position tags.
pub fn parse_side(config: &RigConfig, side: &str) -> Result<Side> {
    match side.parse::<Side>() {
        Ok(parsed) if config.accepts_side(parsed) => Ok(parsed),
        _ => Err(RigError::InvalidSide {
            side: side.to_string(),
            expected: config.sides.iter().map(|s| s.tag().to_string()).collect(),
        }),
    }
}

/// `{side}_{base}` unless the first `_` segment of `base` already is the tag.
pub fn with_side_prefix(base: &str, side: Side) -> String {
    match base.split('_').next() {
        Some(first) if first == side.tag() => base.to_string(),
        _ => format!("{}_{}", side.tag(), base),
    }
}

/// Resolve a logical type, base name and optional side into the canonical
/// node name and the host primitive to instantiate.
pub fn resolve(
    config: &RigConfig,
    node_type: &NodeType,
    base_name: &str,
    side: Option<&str>,
) -> Result<ResolvedName> {
    if base_name.is_empty() {
        return Err(RigError::config("node base name is empty"));
    }
    let side = side.map(|s| parse_side(config, s)).transpose()?;
    let prefixed = match side {
        Some(s) => with_side_prefix(base_name, s),
        None => base_name.to_string(),
    };
    Ok(ResolvedName {
        name: format!("{prefixed}{}", node_type.suffix()),
        primitive: node_type.primitive().to_string(),
        side,
    })
}
