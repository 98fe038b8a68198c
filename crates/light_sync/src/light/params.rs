//! Typed attribute reads with schema fallbacks
//!
//! Every read distinguishes three outcomes: unauthored (the schema default
//! applies), well formed (the value applies) and malformed (the field keeps
//! its previous value and a warning is logged). Malformed reads come back
//! as `None`.

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{PrimPath, SceneDelegate, Value};
use std::path::PathBuf;

pub(crate) struct AttributeReader<'a, D: ?Sized> {
    delegate: &'a D,
    path: &'a PrimPath,
}

impl<'a, D: SceneDelegate + ?Sized> AttributeReader<'a, D> {
    pub(crate) fn new(delegate: &'a D, path: &'a PrimPath) -> Self {
        Self { delegate, path }
    }

    pub(crate) fn prim_path(&self) -> &PrimPath {
        self.path
    }

    fn read<T>(
        &self,
        name: &str,
        value: Option<Value>,
        default: T,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let Some(value) = value else {
            return Some(default);
        };
        let converted = convert(&value);
        if converted.is_none() {
            log::warn!(
                "Ignoring malformed {} on light {} ({} value {:?})",
                name,
                self.path,
                value.type_name(),
                value
            );
        }
        converted
    }

    /// Finite float
    pub(crate) fn float(&self, name: &str, default: f32) -> Option<f32> {
        let value = self.delegate.attribute(self.path, name);
        self.read(name, value, default, |v| v.as_f32().filter(|f| f.is_finite()))
    }

    /// Finite float that must not be negative (radii, lengths, angles)
    pub(crate) fn extent(&self, name: &str, default: f32) -> Option<f32> {
        let value = self.delegate.attribute(self.path, name);
        self.read(name, value, default, |v| {
            v.as_f32().filter(|f| f.is_finite() && *f >= 0.0)
        })
    }

    pub(crate) fn boolean(&self, name: &str, default: bool) -> Option<bool> {
        let value = self.delegate.attribute(self.path, name);
        self.read(name, value, default, Value::as_bool)
    }

    /// Finite RGB triple
    pub(crate) fn color(&self, name: &str, default: Vec3) -> Option<Vec3> {
        let value = self.delegate.attribute(self.path, name);
        self.read(name, value, default, |v| {
            v.as_vec3().filter(|c| c.iter().all(|x| x.is_finite()))
        })
    }

    /// Asset path; unauthored and empty paths both mean "no asset"
    pub(crate) fn asset(&self, name: &str) -> Option<Option<PathBuf>> {
        let value = self.delegate.attribute(self.path, name);
        self.read(name, value, None, |v| {
            v.as_asset_path()
                .map(|p| (!p.as_os_str().is_empty()).then(|| p.to_path_buf()))
        })
    }

    /// Light-to-world matrix; unauthored means identity
    ///
    /// Only the type is checked here. Invertibility is the caller's
    /// concern since a bad matrix aborts the whole sync.
    pub(crate) fn transform(&self) -> Option<Mat4> {
        let value = self.delegate.transform(self.path);
        self.read(crate::scene::tokens::TRANSFORM, value, Mat4::identity(), Value::as_matrix4)
    }

    pub(crate) fn visibility(&self) -> Option<bool> {
        let value = self.delegate.visibility(self.path);
        self.read(crate::scene::tokens::VISIBILITY, value, true, Value::as_bool)
    }
}
