use rigkit_core::RigError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ComponentError {
    #[error(transparent)]
    Rig(#[from] RigError),

    #[error("control '{control}' is declared more than once")]
    DuplicateControl { control: String },

    /// Parents must be declared before their children.
    #[error("control '{control}' has unknown parent '{parent}'")]
    UnknownParent { control: String, parent: String },

    #[error("invalid control data: {reason}")]
    InvalidData { reason: String },
}

impl ComponentError {
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Rig(err) => err.category(),
            Self::DuplicateControl { .. }
            | Self::UnknownParent { .. }
            | Self::InvalidData { .. } => "control_data",
        }
    }
}

pub type ComponentResult<T> = std::result::Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_errors_keep_their_category() {
        let err: ComponentError = RigError::config("bad").into();
        assert_eq!(err.category(), "configuration");
        assert_eq!(err.to_string(), "configuration error: bad");
    }
}
