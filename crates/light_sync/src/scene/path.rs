//! Scene-graph prim paths

use serde::{Serialize, Deserialize};
use std::fmt;

/// Absolute path of a prim in the scene graph, e.g. `/World/Lights/Key`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimPath(String);

impl PrimPath {
    /// Create a path from its string form
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// String form of the path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path element
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrimPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PrimPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}
