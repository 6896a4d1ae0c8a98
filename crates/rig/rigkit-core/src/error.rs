//! Error types for the rigging layer

use rigkit_scene_core::SceneError;

/// Every failure surfaced by node, attribute and routing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RigError {
    /// Semantic attribute type outside the supported vocabulary
    #[error("unknown attribute type '{name}'")]
    UnknownAttrType { name: String },

    /// Side tag outside the configured position tags
    #[error("invalid side '{side}': expected one of {expected:?}")]
    InvalidSide { side: String, expected: Vec<String> },

    /// Missing or contradictory parameters
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error("attribute '{attr}' already exists on '{node}'")]
    AttributeExists { node: String, attr: String },

    #[error("attribute '{node}.{attr}' is locked")]
    LockedAttribute { node: String, attr: String },

    #[error("value {value} for '{node}.{attr}' is outside [{min:?}, {max:?}]")]
    Range {
        node: String,
        attr: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("'{destination}' is already driven by '{driver}'")]
    DuplicateConnection { destination: String, driver: String },

    /// The node has no live host object (never bound, or deleted on the host)
    #[error("node '{node}' has no live object in the scene")]
    HostSync { node: String },

    /// Any other host failure
    #[error("scene error: {0}")]
    Scene(SceneError),
}

impl RigError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Error family, for logging and tests.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownAttrType { .. } | Self::InvalidSide { .. } | Self::Configuration { .. } => {
                "configuration"
            }
            Self::AttributeExists { .. } => "attribute_exists",
            Self::LockedAttribute { .. } => "locked_attribute",
            Self::Range { .. } => "range",
            Self::DuplicateConnection { .. } => "duplicate_connection",
            Self::HostSync { .. } => "host_sync",
            Self::Scene(_) => "scene",
        }
    }
}

impl From<SceneError> for RigError {
    fn from(err: SceneError) -> Self {
        match err {
            SceneError::StaleHandle { handle } => Self::HostSync {
                node: handle.to_string(),
            },
            SceneError::AttrExists { node, attr } => Self::AttributeExists { node, attr },
            SceneError::AttrLocked { node, attr } => Self::LockedAttribute { node, attr },
            SceneError::OutOfRange {
                node,
                attr,
                value,
                min,
                max,
            } => Self::Range {
                node,
                attr,
                value,
                min,
                max,
            },
            SceneError::AlreadyConnected {
                destination,
                driver,
            } => Self::DuplicateConnection {
                destination,
                driver,
            },
            SceneError::InvalidDefinition { reason } => Self::Configuration { reason },
            other => Self::Scene(other),
        }
    }
}

/// Rigging layer result type
pub type Result<T> = core::result::Result<T, RigError>;
