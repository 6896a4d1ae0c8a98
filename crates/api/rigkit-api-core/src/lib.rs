//! rigkit-api-core: attribute values, host attribute kinds and plug paths
//! shared by the scene host and the rigging layer.

pub mod coercion;
pub mod kind;
pub mod plug;
pub mod value;

pub use kind::HostAttrKind;
pub use plug::AttrPath;
pub use value::{AttrValue, ValueKind};
