//! Scene delegate interface and an in-memory implementation
//!
//! The delegate is the sole source of truth for prim attributes. Lights
//! only ever read from it.

use super::dirty::DirtyBits;
use super::path::PrimPath;
use super::tokens;
use super::value::Value;
use std::collections::HashMap;

/// Supplies attribute values for prims
pub trait SceneDelegate {
    /// Value of `name` on the prim at `path`, or `None` when unauthored
    fn attribute(&self, path: &PrimPath, name: &str) -> Option<Value>;

    /// Light-to-world transform of the prim
    fn transform(&self, path: &PrimPath) -> Option<Value> {
        self.attribute(path, tokens::TRANSFORM)
    }

    /// Overall visibility of the prim
    fn visibility(&self, path: &PrimPath) -> Option<Value> {
        self.attribute(path, tokens::VISIBILITY)
    }
}

/// Dirty category an attribute belongs to
pub fn category_of(name: &str) -> DirtyBits {
    match name {
        tokens::TRANSFORM => DirtyBits::DIRTY_TRANSFORM,
        tokens::VISIBILITY | tokens::VISIBILITY_CAMERA | tokens::VISIBILITY_SHADOW => {
            DirtyBits::DIRTY_VISIBILITY
        }
        _ => DirtyBits::DIRTY_PARAMS,
    }
}

#[derive(Debug, Clone, Default)]
struct PrimEntry {
    type_name: String,
    attributes: HashMap<String, Value>,
}

/// Hash-map backed delegate for tools and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryDelegate {
    prims: HashMap<PrimPath, PrimEntry>,
}

impl MemoryDelegate {
    /// Create an empty delegate
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prim with its declared type, replacing any previous prim
    pub fn insert_prim(&mut self, path: PrimPath, type_name: impl Into<String>) {
        self.prims.insert(
            path,
            PrimEntry {
                type_name: type_name.into(),
                attributes: HashMap::new(),
            },
        );
    }

    /// Remove a prim; returns whether it existed
    pub fn remove_prim(&mut self, path: &PrimPath) -> bool {
        self.prims.remove(path).is_some()
    }

    /// Declared type of a prim
    pub fn type_name(&self, path: &PrimPath) -> Option<&str> {
        self.prims.get(path).map(|prim| prim.type_name.as_str())
    }

    /// Author an attribute and return the dirty category it touches
    ///
    /// Returns [`DirtyBits::CLEAN`] when the prim does not exist or the
    /// value is unchanged.
    pub fn set(&mut self, path: &PrimPath, name: &str, value: impl Into<Value>) -> DirtyBits {
        let Some(prim) = self.prims.get_mut(path) else {
            log::warn!("Attribute {} authored on unknown prim {}", name, path);
            return DirtyBits::CLEAN;
        };

        let value = value.into();
        if prim.attributes.get(name) == Some(&value) {
            return DirtyBits::CLEAN;
        }
        prim.attributes.insert(name.to_string(), value);
        category_of(name)
    }

    /// Remove an authored attribute so its fallback applies again
    pub fn clear(&mut self, path: &PrimPath, name: &str) -> DirtyBits {
        match self.prims.get_mut(path).and_then(|prim| prim.attributes.remove(name)) {
            Some(_) => category_of(name),
            None => DirtyBits::CLEAN,
        }
    }
}

impl SceneDelegate for MemoryDelegate {
    fn attribute(&self, path: &PrimPath, name: &str) -> Option<Value> {
        self.prims.get(path)?.attributes.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_category() {
        let path = PrimPath::from("/Lights/Key");
        let mut delegate = MemoryDelegate::new();
        delegate.insert_prim(path.clone(), tokens::SPHERE_LIGHT);

        assert_eq!(delegate.set(&path, tokens::INTENSITY, 2.0_f32), DirtyBits::DIRTY_PARAMS);
        assert_eq!(delegate.set(&path, tokens::VISIBILITY_CAMERA, false), DirtyBits::DIRTY_VISIBILITY);
        assert_eq!(delegate.set(&path, tokens::INTENSITY, 2.0_f32), DirtyBits::CLEAN);
        assert_eq!(delegate.attribute(&path, tokens::INTENSITY), Some(Value::Float(2.0)));
    }

    #[test]
    fn test_unknown_prim_is_clean() {
        let mut delegate = MemoryDelegate::new();
        let path = PrimPath::from("/Missing");
        assert_eq!(delegate.set(&path, tokens::INTENSITY, 1.0_f32), DirtyBits::CLEAN);
        assert!(delegate.attribute(&path, tokens::INTENSITY).is_none());
    }

    #[test]
    fn test_clear_reports_category_once() {
        let path = PrimPath::from("/Lights/Key");
        let mut delegate = MemoryDelegate::new();
        delegate.insert_prim(path.clone(), tokens::RECT_LIGHT);
        delegate.set(&path, tokens::VISIBILITY_SHADOW, false);

        assert_eq!(delegate.clear(&path, tokens::VISIBILITY_SHADOW), DirtyBits::DIRTY_VISIBILITY);
        assert!(delegate.attribute(&path, tokens::VISIBILITY_SHADOW).is_none());
        assert_eq!(delegate.clear(&path, tokens::VISIBILITY_SHADOW), DirtyBits::CLEAN);
        assert_eq!(delegate.clear(&PrimPath::from("/Missing"), tokens::WIDTH), DirtyBits::CLEAN);
    }
}
