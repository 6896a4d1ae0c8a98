//! AttrPath parsing and formatting.
//!
//! Grammar:
//!   node.attr
//! - the first '.' separates the node name from the attribute name
//! - the attribute part may itself contain '.' for nested plugs
//!   Examples:
//!   "L_arm_JNT.translateX" -> node="L_arm_JNT", attr="translateX"
//!   "M_cog.visibility" -> node="M_cog", attr="visibility"
//!
//! Whitespace is rejected anywhere in the path.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    /// Scene node name
    pub node: String,
    /// Attribute name on that node
    pub attr: String,
}

impl AttrPath {
    pub fn new(node: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            attr: attr.into(),
        }
    }

    /// Parse a `node.attr` string.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("empty plug path".to_string());
        }
        if s.chars().any(char::is_whitespace) {
            return Err(format!("invalid plug path '{s}': contains whitespace"));
        }
        let (node, attr) = s
            .split_once('.')
            .ok_or_else(|| format!("invalid plug path '{s}': expected node.attr"))?;
        if node.is_empty() {
            return Err(format!("invalid plug path '{s}': empty node name"));
        }
        if attr.is_empty() || attr.split('.').any(str::is_empty) {
            return Err(format!("invalid plug path '{s}': empty attribute segment"));
        }
        Ok(AttrPath::new(node, attr))
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.attr)
    }
}

impl FromStr for AttrPath {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttrPath::parse(s)
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for AttrPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AttrPath {
    fn deserialize<D>(deserializer: D) -> Result<AttrPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AttrPath::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let p = AttrPath::parse("L_arm_JNT.translateX").unwrap();
        assert_eq!(p.node, "L_arm_JNT");
        assert_eq!(p.attr, "translateX");
        assert_eq!(p.to_string(), "L_arm_JNT.translateX");
    }

    #[test]
    fn nested_attr_kept_whole() {
        let p = AttrPath::parse("node.worldMatrix.0").unwrap();
        assert_eq!(p.node, "node");
        assert_eq!(p.attr, "worldMatrix.0");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(AttrPath::parse("").is_err());
        assert!(AttrPath::parse("node").is_err());
        assert!(AttrPath::parse(".attr").is_err());
        assert!(AttrPath::parse("node.").is_err());
        assert!(AttrPath::parse("node..x").is_err());
        assert!(AttrPath::parse("my node.attr").is_err());
    }

    #[test]
    fn serde_as_string() {
        let p = AttrPath::new("M_cog", "visibility");
        let s = serde_json::to_string(&p).unwrap();
        assert_eq!(s, "\"M_cog.visibility\"");
        let back: AttrPath = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }
}
