//! AttrValue: runtime values stored on host attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightweight kind enum for quick dispatch without matching payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Double,
    Long,
    Bool,
    Enum,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum AttrValue {
    /// Continuous numeric value
    Double(f64),

    /// Discrete numeric value (no decimals)
    Long(i64),

    /// Boolean, stored by most hosts as a 0/1 discrete value
    Bool(bool),

    /// Index into an enum attribute's label list
    Enum(u32),
}

impl AttrValue {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            AttrValue::Double(_) => ValueKind::Double,
            AttrValue::Long(_) => ValueKind::Long,
            AttrValue::Bool(_) => ValueKind::Bool,
            AttrValue::Enum(_) => ValueKind::Enum,
        }
    }

    /// Numeric view used for range checks.
    pub fn as_f64(&self) -> f64 {
        match self {
            AttrValue::Double(v) => *v,
            AttrValue::Long(v) => *v as f64,
            AttrValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            AttrValue::Enum(i) => *i as f64,
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        AttrValue::Double(0.0)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Double(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Long(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Double(v) => write!(f, "{v}"),
            AttrValue::Long(v) => write!(f, "{v}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Enum(i) => write!(f, "enum({i})"),
        }
    }
}
