//! rigkit-components
//!
//! Components group a handful of controls under one transform. Each control
//! is positioned, parented, labelled with a header attribute, and has its
//! scale and visibility locked.

pub mod cog;
pub mod component;
pub mod error;

pub use cog::Cog;
pub use component::{build_controls, BuiltComponent, Component, ComponentData, ControlSpec};
pub use error::{ComponentError, ComponentResult};
