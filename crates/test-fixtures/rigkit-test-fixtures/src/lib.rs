use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    configs: HashMap<String, String>,
    attributes: HashMap<String, String>,
    components: HashMap<String, ComponentEntry>,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    controls: String,
    /// Expected name of the built controls group.
    group: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Rig configuration documents. Some are deliberately invalid.
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        Ok(resolve_path(rel))
    }
}

/// Arrays of attribute specs.
pub mod attributes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.attributes.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.attributes, "attribute set", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.attributes, "attribute set", name)?;
        super::load_json(rel)
    }
}

/// Control data for components, with the group name a build should produce.
pub mod components {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.components.keys().cloned().collect()
    }

    pub fn controls_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.components, "component", name)?;
        read_to_string(&entry.controls)
    }

    pub fn controls<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.components, "component", name)?;
        super::load_json(&entry.controls)
    }

    pub fn group(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.components, "component", name)?;
        Ok(entry.group.clone())
    }
}
