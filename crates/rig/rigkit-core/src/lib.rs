//! rigkit-core
//!
//! Typed node and attribute layer over a host scene graph: canonical naming,
//! semantic attribute types, lock/visibility state, and signal routing through
//! memoized utility nodes.
//!
//! ```
//! use rigkit_core::{AttrSpec, Node, RigContext};
//! use rigkit_scene_core::MemoryScene;
//!
//! let mut ctx = RigContext::with_scene(MemoryScene::new());
//! let mut arm = Node::create(&mut ctx, "joint", "arm", Some("L")).unwrap();
//! assert_eq!(arm.name(), "L_arm_JNT");
//! arm.add_attr(&mut ctx, &AttrSpec::new("fkIk", "slider").default_value(0.5))
//!     .unwrap();
//! ```

pub mod attr_type;
pub mod attributes;
pub mod config;
pub mod context;
pub mod error;
pub mod naming;
pub mod node;
pub mod routing;

pub use attr_type::{AttrSpec, AttrType, Attribute, ResolvedAttr};
pub use attributes::{connect, connect_inverted, connect_negated, expand_attrs, link};
pub use config::RigConfig;
pub use context::RigContext;
pub use error::{Result, RigError};
pub use naming::{NodeType, ResolvedName, Side};
pub use node::Node;
pub use routing::{RoutingKind, UtilityNode};
