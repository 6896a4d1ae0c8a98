//! Errors reported by scene-graph hosts.

use rigkit_api_core::{AttrValue, HostAttrKind};

use crate::NodeHandle;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    /// The handle refers to a node that no longer exists
    #[error("node {handle} no longer exists in the scene")]
    StaleHandle { handle: NodeHandle },

    #[error("no node named '{name}'")]
    NodeNotFound { name: String },

    #[error("attribute '{attr}' not found on '{node}'")]
    AttrNotFound { node: String, attr: String },

    #[error("attribute '{attr}' already exists on '{node}'")]
    AttrExists { node: String, attr: String },

    #[error("attribute '{node}.{attr}' is locked")]
    AttrLocked { node: String, attr: String },

    #[error("value {value} for '{node}.{attr}' is outside [{min:?}, {max:?}]")]
    OutOfRange {
        node: String,
        attr: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("value {value} cannot be stored in {expected} attribute '{node}.{attr}'")]
    KindMismatch {
        node: String,
        attr: String,
        expected: HostAttrKind,
        value: AttrValue,
    },

    #[error("'{destination}' is already driven by '{driver}'")]
    AlreadyConnected { destination: String, driver: String },

    #[error("'{destination}' is not driven by '{driver}'")]
    NotConnected { destination: String, driver: String },

    #[error("built-in attribute '{node}.{attr}' cannot be removed")]
    BuiltinRemoval { node: String, attr: String },

    #[error("invalid attribute definition: {reason}")]
    InvalidDefinition { reason: String },

    #[error("parenting '{child}' under '{parent}' would create a cycle")]
    ParentCycle { child: String, parent: String },
}

pub type SceneResult<T> = Result<T, SceneError>;
