//! Center-of-gravity component: a single control above the origin.

use rigkit_core::Side;

use crate::{Component, ControlSpec};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cog;

impl Component for Cog {
    fn name(&self) -> &str {
        "cog"
    }

    fn side(&self) -> Side {
        Side::M
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![ControlSpec::new("cog", Side::M, "arrow_cross")
            .position([0.0, 25.0, 0.0, 0.0, 0.0, 0.0])]
    }
}
