//! Primitive attribute kinds understood by the host scene graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::{AttrValue, ValueKind};

/// Host-level attribute primitive.
///
/// Custom attributes only ever use `Double`, `Long` and `Enum`; `Bool` exists
/// for built-in host attributes such as `visibility`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HostAttrKind {
    Double,
    Long,
    Enum,
    Bool,
}

impl HostAttrKind {
    /// Host type name as it would appear in an add-attribute command.
    pub fn host_name(&self) -> &'static str {
        match self {
            HostAttrKind::Double => "double",
            HostAttrKind::Long => "long",
            HostAttrKind::Enum => "enum",
            HostAttrKind::Bool => "bool",
        }
    }

    /// Zero value for this kind.
    pub fn zero(&self) -> AttrValue {
        match self {
            HostAttrKind::Double => AttrValue::Double(0.0),
            HostAttrKind::Long => AttrValue::Long(0),
            HostAttrKind::Enum => AttrValue::Enum(0),
            HostAttrKind::Bool => AttrValue::Bool(false),
        }
    }

    /// The value kind a plain read of this attribute produces.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            HostAttrKind::Double => ValueKind::Double,
            HostAttrKind::Long => ValueKind::Long,
            HostAttrKind::Enum => ValueKind::Enum,
            HostAttrKind::Bool => ValueKind::Bool,
        }
    }

    /// Whether values of this kind carry no fractional part.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, HostAttrKind::Double)
    }
}

impl fmt::Display for HostAttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}
