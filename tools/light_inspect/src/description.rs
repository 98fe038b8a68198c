//! RON scene descriptions for the inspector

use anyhow::{Context, Result};
use light_sync::scene::{MemoryDelegate, PrimPath, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A light prim with its authored attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightPrim {
    pub path: String,
    pub type_name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

/// An attribute edit applied after the first sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edit {
    pub path: String,
    pub name: String,
    /// `None` clears the attribute
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub lights: Vec<LightPrim>,
    #[serde(default)]
    pub edits: Vec<Edit>,
}

impl SceneDescription {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene description {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("Failed to parse scene description {}", path.display()))
    }

    /// Populate a delegate with every prim and its attributes
    pub fn build_delegate(&self) -> MemoryDelegate {
        let mut delegate = MemoryDelegate::new();
        for prim in &self.lights {
            let path = PrimPath::from(prim.path.as_str());
            delegate.insert_prim(path.clone(), prim.type_name.as_str());
            for (name, value) in &prim.attributes {
                delegate.set(&path, name, value.clone());
            }
        }
        delegate
    }
}
