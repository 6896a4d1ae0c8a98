use rigkit_scene_core::SceneGraph;

use crate::RigConfig;

/// The injected host scene plus the rig configuration. Every operation in
/// this crate receives one explicitly; nothing reaches for global state.
#[derive(Debug, Default)]
pub struct RigContext<S: SceneGraph> {
    pub scene: S,
    pub config: RigConfig,
}

impl<S: SceneGraph> RigContext<S> {
    pub fn new(scene: S, config: RigConfig) -> Self {
        Self { scene, config }
    }

    /// Context with the default configuration.
    pub fn with_scene(scene: S) -> Self {
        Self::new(scene, RigConfig::default())
    }
}
