//! Rig-wide configuration.

use serde::{Deserialize, Serialize};

use crate::naming::Side;
use crate::{Result, RigError};

/// Options shared by every operation through [`crate::RigContext`].
/// Unknown keys are rejected when loading from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    /// Position tags accepted by name resolution.
    pub sides: Vec<Side>,
    /// Suffix of inverter utility nodes (`{node}_{attr}_{suffix}`).
    pub inverter_suffix: String,
    /// Suffix of negator utility nodes.
    pub negator_suffix: String,
    /// Inspector visibility used by `attr_lock` when the caller passes none.
    pub lock_show: bool,
    /// Inspector visibility used by `attr_unlock` when the caller passes none.
    pub unlock_show: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            sides: Side::ALL.to_vec(),
            inverter_suffix: "REV".to_string(),
            negator_suffix: "NEG".to_string(),
            lock_show: false,
            unlock_show: true,
        }
    }
}

impl RigConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: RigConfig =
            serde_json::from_str(s).map_err(|e| RigError::config(format!("rig config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sides.is_empty() {
            return Err(RigError::config("at least one side must be configured"));
        }
        for (label, suffix) in [
            ("inverter_suffix", &self.inverter_suffix),
            ("negator_suffix", &self.negator_suffix),
        ] {
            if suffix.is_empty() || suffix.chars().any(|c| c.is_whitespace() || c == '.') {
                return Err(RigError::config(format!(
                    "{label} '{suffix}' must be a non-empty node-name fragment"
                )));
            }
        }
        if self.inverter_suffix == self.negator_suffix {
            return Err(RigError::config(
                "inverter and negator suffixes must differ",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn accepts_side(&self, side: Side) -> bool {
        self.sides.contains(&side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RigConfig::default();
        assert_eq!(cfg.sides, vec![Side::L, Side::R, Side::M, Side::C]);
        assert!(!cfg.lock_show);
        assert!(cfg.unlock_show);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = RigConfig::from_json_str(r#"{ "sides": ["L", "R"] }"#).unwrap();
        assert_eq!(cfg.sides, vec![Side::L, Side::R]);
        assert_eq!(cfg.inverter_suffix, "REV");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RigConfig::from_json_str(r#"{ "sidez": ["L"] }"#).unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn clashing_suffixes_are_rejected() {
        let err = RigConfig::from_json_str(r#"{ "negator_suffix": "REV" }"#).unwrap_err();
        assert!(matches!(err, RigError::Configuration { .. }));
    }
}
