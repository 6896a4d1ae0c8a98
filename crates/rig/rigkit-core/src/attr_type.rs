//! Semantic attribute types and their resolution onto host primitives.
//!
//! | type   | host   | range          | notes                              |
//! |--------|--------|----------------|------------------------------------|
//! | float  | double | caller         |                                    |
//! | slider | double | forced [0, 1]  |                                    |
//! | long   | long   | caller         | integral default                   |
//! | bool   | long   | forced [0, 1]  | integral default                   |
//! | enum   | enum   | n/a            | labels kept in order               |
//! | header | enum   | n/a            | non-keyable label, name = its text |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use rigkit_api_core::{AttrValue, HostAttrKind};
use rigkit_scene_core::AttrDefinition;

use crate::{Result, RigError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Float,
    Long,
    Enum,
    Slider,
    Bool,
    Header,
}

impl AttrType {
    pub fn name(&self) -> &'static str {
        match self {
            AttrType::Float => "float",
            AttrType::Long => "long",
            AttrType::Enum => "enum",
            AttrType::Slider => "slider",
            AttrType::Bool => "bool",
            AttrType::Header => "header",
        }
    }

    pub fn host_kind(&self) -> HostAttrKind {
        match self {
            AttrType::Float | AttrType::Slider => HostAttrKind::Double,
            AttrType::Long | AttrType::Bool => HostAttrKind::Long,
            AttrType::Enum | AttrType::Header => HostAttrKind::Enum,
        }
    }

    /// Range imposed regardless of caller input.
    pub fn forced_range(&self) -> Option<(f64, f64)> {
        match self {
            AttrType::Slider | AttrType::Bool => Some((0.0, 1.0)),
            _ => None,
        }
    }

    fn takes_range(&self) -> bool {
        matches!(
            self,
            AttrType::Float | AttrType::Long | AttrType::Slider | AttrType::Bool
        )
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttrType {
    type Err = RigError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "float" => Ok(AttrType::Float),
            "long" => Ok(AttrType::Long),
            "enum" => Ok(AttrType::Enum),
            "slider" => Ok(AttrType::Slider),
            "bool" => Ok(AttrType::Bool),
            "header" => Ok(AttrType::Header),
            other => Err(RigError::UnknownAttrType {
                name: other.to_string(),
            }),
        }
    }
}

impl From<AttrType> for String {
    fn from(t: AttrType) -> Self {
        t.name().to_string()
    }
}

fn default_attr_type() -> String {
    AttrType::Slider.name().to_string()
}

fn default_keyable() -> bool {
    true
}

/// Caller-facing attribute request. The type is kept as text so an unknown
/// type surfaces as [`RigError::UnknownAttrType`] during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttrSpec {
    /// Required for every type but `header`.
    #[serde(default)]
    pub attr_name: String,
    #[serde(default = "default_attr_type")]
    pub attr_type: String,
    #[serde(default)]
    pub default_value: f64,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_keyable")]
    pub keyable: bool,
    /// Options of an `enum` attribute.
    #[serde(default)]
    pub enums: Vec<String>,
    /// Label text of a `header` attribute.
    #[serde(default)]
    pub header_val: Option<String>,
}

impl AttrSpec {
    pub fn new(attr_name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        Self {
            attr_name: attr_name.into(),
            attr_type: attr_type.into(),
            default_value: 0.0,
            min_value: None,
            max_value: None,
            hidden: false,
            keyable: true,
            enums: Vec::new(),
            header_val: None,
        }
    }

    /// A header label; the text doubles as the attribute name.
    pub fn header(text: impl Into<String>) -> Self {
        let mut spec = Self::new("", AttrType::Header);
        spec.header_val = Some(text.into());
        spec
    }

    pub fn enumeration<I, L>(attr_name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut spec = Self::new(attr_name, AttrType::Enum);
        spec.enums = labels.into_iter().map(Into::into).collect();
        spec
    }

    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn keyable(mut self, keyable: bool) -> Self {
        self.keyable = keyable;
        self
    }
}

/// Normalized metadata of an attribute declared on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub attr_name: String,
    pub semantic_type: AttrType,
    pub default_value: f64,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub hidden: bool,
    pub keyable: bool,
    pub enum_labels: Vec<String>,
}

/// Output of [`resolve`]: host parameters plus the metadata to record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttr {
    pub attribute: Attribute,
    pub definition: AttrDefinition,
    /// Non-keyable but visible: the host hides such attributes from the
    /// inspector unless told otherwise after creation.
    pub force_channel_box: bool,
}

/// Map an [`AttrSpec`] onto host primitives and canonical constraints.
pub fn resolve(spec: &AttrSpec) -> Result<ResolvedAttr> {
    let semantic_type: AttrType = spec.attr_type.parse()?;
    let mut attr_name = spec.attr_name.clone();
    let mut keyable = spec.keyable;
    let mut hidden = spec.hidden;
    let mut enum_labels = Vec::new();
    let mut nice_name = None;
    let mut default_value = spec.default_value;

    match semantic_type {
        AttrType::Enum => {
            if spec.enums.is_empty() {
                return Err(RigError::config(format!(
                    "enum attribute '{attr_name}' needs at least one label"
                )));
            }
            enum_labels = spec.enums.clone();
        }
        AttrType::Header => {
            let text = spec
                .header_val
                .as_deref()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| RigError::config("header attribute requires header_val"))?;
            attr_name = text.to_string();
            enum_labels = vec![text.to_string()];
            nice_name = Some(" ".to_string());
            keyable = false;
            hidden = false;
            default_value = 0.0;
        }
        _ => {}
    }

    if attr_name.is_empty() {
        return Err(RigError::config(format!(
            "{semantic_type} attribute requires a name"
        )));
    }
    if attr_name.chars().any(|c| c.is_whitespace() || c == '.') {
        return Err(RigError::config(format!(
            "attribute name '{attr_name}' contains whitespace or '.'"
        )));
    }

    let (min_value, max_value) = match semantic_type.forced_range() {
        Some((lo, hi)) => (Some(lo), Some(hi)),
        None if semantic_type.takes_range() => (spec.min_value, spec.max_value),
        None => (None, None),
    };
    if min_value.into_iter().chain(max_value).any(f64::is_nan) {
        return Err(RigError::config(format!(
            "range of '{attr_name}' has a NaN bound"
        )));
    }
    if let (Some(lo), Some(hi)) = (min_value, max_value) {
        if lo > hi {
            return Err(RigError::config(format!(
                "min {lo} is greater than max {hi} on '{attr_name}'"
            )));
        }
    }

    if !default_value.is_finite() {
        return Err(RigError::config(format!(
            "attribute '{attr_name}' cannot default to {default_value}"
        )));
    }
    let kind = semantic_type.host_kind();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if kind == HostAttrKind::Long
        && (default_value < i64::MIN as f64 || default_value >= i64::MAX as f64)
    {
        return Err(RigError::config(format!(
            "{semantic_type} attribute '{attr_name}' default {default_value} does not fit a 64-bit integer"
        )));
    }
    if kind.is_discrete() && default_value.fract() != 0.0 {
        return Err(RigError::config(format!(
            "{semantic_type} attribute '{attr_name}' cannot default to {default_value}"
        )));
    }
    let below = min_value.map_or(false, |lo| default_value < lo);
    let above = max_value.map_or(false, |hi| default_value > hi);
    let bad_index = kind == HostAttrKind::Enum
        && (default_value < 0.0 || default_value >= enum_labels.len() as f64);
    if below || above || bad_index {
        return Err(RigError::config(format!(
            "default {default_value} is outside the allowed values of '{attr_name}'"
        )));
    }

    let host_default = match kind {
        HostAttrKind::Double => AttrValue::Double(default_value),
        HostAttrKind::Long => AttrValue::Long(default_value as i64),
        HostAttrKind::Enum => AttrValue::Enum(default_value as u32),
        HostAttrKind::Bool => AttrValue::Bool(default_value != 0.0),
    };

    let definition = AttrDefinition {
        name: attr_name.clone(),
        kind,
        default: host_default,
        min: min_value,
        max: max_value,
        enum_labels: enum_labels.clone(),
        keyable,
        hidden,
        nice_name,
    };
    let attribute = Attribute {
        attr_name,
        semantic_type,
        default_value,
        min_value,
        max_value,
        hidden,
        keyable,
        enum_labels,
    };
    Ok(ResolvedAttr {
        attribute,
        definition,
        force_channel_box: !keyable && !hidden,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_and_bool_ranges_are_forced() {
        for ty in [AttrType::Slider, AttrType::Bool] {
            let spec = AttrSpec::new("blend", ty).range(Some(-10.0), Some(10.0));
            let r = resolve(&spec).unwrap();
            assert_eq!(r.definition.min, Some(0.0));
            assert_eq!(r.definition.max, Some(1.0));
            assert_eq!(r.attribute.min_value, Some(0.0));
            assert_eq!(r.attribute.max_value, Some(1.0));
        }
    }

    #[test]
    fn primitive_mapping() {
        let cases = [
            ("float", HostAttrKind::Double),
            ("slider", HostAttrKind::Double),
            ("long", HostAttrKind::Long),
            ("bool", HostAttrKind::Long),
        ];
        for (ty, kind) in cases {
            let r = resolve(&AttrSpec::new("a", ty)).unwrap();
            assert_eq!(r.definition.kind, kind, "{ty}");
        }
        let r = resolve(&AttrSpec::enumeration("space", ["world", "local"])).unwrap();
        assert_eq!(r.definition.kind, HostAttrKind::Enum);
        assert_eq!(r.definition.enum_string(), "world:local");
    }

    #[test]
    fn float_keeps_caller_range() {
        let r = resolve(&AttrSpec::new("twist", "float").range(Some(-180.0), None)).unwrap();
        assert_eq!(r.definition.min, Some(-180.0));
        assert_eq!(r.definition.max, None);
    }

    #[test]
    fn header_is_a_single_label_enum() {
        let mut spec = AttrSpec::header("SETTINGS");
        spec.keyable = true;
        spec.hidden = true;
        let r = resolve(&spec).unwrap();
        assert_eq!(r.attribute.attr_name, "SETTINGS");
        assert_eq!(r.attribute.enum_labels, vec!["SETTINGS".to_string()]);
        assert!(!r.definition.keyable);
        assert!(!r.definition.hidden);
        assert_eq!(r.definition.nice_name.as_deref(), Some(" "));
        assert!(r.force_channel_box);
    }

    #[test]
    fn header_without_text_is_a_configuration_error() {
        let err = resolve(&AttrSpec::new("x", "header")).unwrap_err();
        assert!(matches!(err, RigError::Configuration { .. }));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = resolve(&AttrSpec::new("x", "vector")).unwrap_err();
        assert_eq!(err, RigError::UnknownAttrType { name: "vector".into() });
    }

    #[test]
    fn non_keyable_visible_needs_channel_box_step() {
        let r = resolve(&AttrSpec::new("info", "float").keyable(false)).unwrap();
        assert!(r.force_channel_box);
        let r = resolve(&AttrSpec::new("info", "float").keyable(false).hidden(true)).unwrap();
        assert!(!r.force_channel_box);
        let r = resolve(&AttrSpec::new("info", "float")).unwrap();
        assert!(!r.force_channel_box);
    }

    #[test]
    fn invalid_defaults() {
        assert!(resolve(&AttrSpec::new("n", "long").default_value(0.5)).is_err());
        assert!(resolve(&AttrSpec::new("s", "slider").default_value(2.0)).is_err());
        assert!(resolve(&AttrSpec::enumeration("e", ["a"]).default_value(1.0)).is_err());
        assert!(resolve(&AttrSpec::new("f", "float").range(Some(1.0), Some(0.0))).is_err());
        assert!(resolve(&AttrSpec::new("", "float")).is_err());
        assert!(resolve(&AttrSpec::new("e", "enum")).is_err());
    }

    #[test]
    fn defaults_must_be_finite_and_fit_the_host_kind() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = resolve(&AttrSpec::new("f", "float").default_value(bad)).unwrap_err();
            assert_eq!(err.category(), "configuration", "{bad}");
        }
        let err = resolve(&AttrSpec::new("n", "long").default_value(1e20)).unwrap_err();
        assert_eq!(err.category(), "configuration");
        assert!(resolve(&AttrSpec::new("n", "long").default_value(-1e19)).is_err());
        assert!(resolve(&AttrSpec::new("f", "float").range(Some(f64::NAN), None)).is_err());

        let big = resolve(&AttrSpec::new("n", "long").default_value(1e15)).unwrap();
        assert_eq!(big.definition.default, AttrValue::Long(1_000_000_000_000_000));
    }

    #[test]
    fn spec_json_rejects_unknown_options() {
        let ok: AttrSpec =
            serde_json::from_str(r#"{ "attr_name": "fkIk", "attr_type": "slider" }"#).unwrap();
        assert!(ok.keyable);
        let bad = serde_json::from_str::<AttrSpec>(r#"{ "attr_name": "x", "niceName": "X" }"#);
        assert!(bad.is_err());
    }
}
