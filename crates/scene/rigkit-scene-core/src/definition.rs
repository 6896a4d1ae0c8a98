//! Attribute definitions and state flags exchanged with the host.

use serde::{Deserialize, Serialize};

use rigkit_api_core::{AttrValue, HostAttrKind};

/// Everything a host needs to add a custom attribute to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrDefinition {
    pub name: String,
    pub kind: HostAttrKind,
    pub default: AttrValue,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Ordered labels; only meaningful for `HostAttrKind::Enum`.
    #[serde(default)]
    pub enum_labels: Vec<String>,
    pub keyable: bool,
    pub hidden: bool,
    /// Display name override shown by the host's inspector.
    #[serde(default)]
    pub nice_name: Option<String>,
}

impl AttrDefinition {
    /// A keyable, visible attribute with the kind's zero default and no range.
    pub fn new(name: impl Into<String>, kind: HostAttrKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: kind.zero(),
            min: None,
            max: None,
            enum_labels: Vec::new(),
            keyable: true,
            hidden: false,
            nice_name: None,
        }
    }

    pub fn with_default(mut self, default: AttrValue) -> Self {
        self.default = default;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.enum_labels = labels;
        self
    }

    /// Labels in the host's `a:b:c` form.
    pub fn enum_string(&self) -> String {
        self.enum_labels.join(":")
    }
}

/// Snapshot of an attribute's declaration and interaction flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrState {
    pub kind: HostAttrKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub enum_labels: Vec<String>,
    pub nice_name: Option<String>,
    pub keyable: bool,
    pub locked: bool,
    /// Shown in the inspector even though not keyable.
    pub channel_box: bool,
    pub hidden: bool,
}

impl AttrState {
    /// Whether the inspector lists this attribute.
    pub fn shown_in_inspector(&self) -> bool {
        !self.hidden && (self.keyable || self.channel_box)
    }

    /// True when `value` respects the declared bounds.
    pub fn in_range(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Flags that would restore this state when applied later.
    pub fn flags(&self) -> AttrFlags {
        AttrFlags {
            keyable: Some(self.keyable),
            locked: Some(self.locked),
            channel_box: Some(self.channel_box),
        }
    }
}

/// Partial update of attribute interaction flags; `None` leaves a flag as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrFlags {
    pub keyable: Option<bool>,
    pub locked: Option<bool>,
    pub channel_box: Option<bool>,
}

impl AttrFlags {
    pub fn keyable(mut self, keyable: bool) -> Self {
        self.keyable = Some(keyable);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn channel_box(mut self, channel_box: bool) -> Self {
        self.channel_box = Some(channel_box);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_string_joins_in_order() {
        let def = AttrDefinition::new("mode", HostAttrKind::Enum)
            .with_labels(vec!["ik".into(), "fk".into(), "blend".into()]);
        assert_eq!(def.enum_string(), "ik:fk:blend");
    }

    #[test]
    fn inspector_visibility_rules() {
        let mut state = AttrState {
            kind: HostAttrKind::Double,
            min: Some(0.0),
            max: Some(1.0),
            enum_labels: vec![],
            nice_name: None,
            keyable: false,
            locked: false,
            channel_box: false,
            hidden: false,
        };
        assert!(!state.shown_in_inspector());
        state.channel_box = true;
        assert!(state.shown_in_inspector());
        state.hidden = true;
        assert!(!state.shown_in_inspector());
        assert!(state.in_range(0.5));
        assert!(!state.in_range(1.5));
    }
}
