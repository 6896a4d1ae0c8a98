//! rigkit-scene-core
//!
//! The host scene graph as seen by the rigging layer. Hosts implement
//! [`SceneGraph`]; [`MemoryScene`] is a self-contained implementation used by
//! tests and offline tooling.

pub mod builtins;
pub mod definition;
pub mod error;
pub mod graph;
pub mod ids;
pub mod memory;

pub use definition::{AttrDefinition, AttrFlags, AttrState};
pub use error::{SceneError, SceneResult};
pub use graph::{Plug, SceneGraph};
pub use ids::{HandleAllocator, NodeHandle};
pub use memory::MemoryScene;
