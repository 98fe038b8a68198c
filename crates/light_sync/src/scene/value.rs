//! Attribute values supplied by a scene delegate

use crate::foundation::math::{Mat4, Vec3};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// A single attribute value
///
/// Accessors are lenient where the conversion is lossless in spirit
/// (ints and doubles read as floats, strings read as asset paths) and
/// return `None` for anything else so the caller can treat the value as
/// malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Single precision float
    Float(f32),
    /// Double precision float
    Double(f64),
    /// Three-component vector or color
    Vec3(Vec3),
    /// 4x4 matrix
    Matrix4(Mat4),
    /// String
    String(String),
    /// Asset path
    Asset(PathBuf),
}

impl Value {
    /// Read as a float
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Double(v) => Some(*v as f32),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Read as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Int(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Read as a vector or color
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Read as a 4x4 matrix
    pub fn as_matrix4(&self) -> Option<Mat4> {
        match self {
            Self::Matrix4(m) => Some(*m),
            _ => None,
        }
    }

    /// Read as an asset path; an empty path means "no asset"
    pub fn as_asset_path(&self) -> Option<&Path> {
        match self {
            Self::Asset(p) => Some(p.as_path()),
            Self::String(s) => Some(Path::new(s.as_str())),
            _ => None,
        }
    }

    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Vec3(_) => "vec3",
            Self::Matrix4(_) => "matrix4",
            Self::String(_) => "string",
            Self::Asset(_) => "asset",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Mat4> for Value {
    fn from(m: Mat4) -> Self {
        Self::Matrix4(m)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Self::Asset(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::Double(2.5).as_f32(), Some(2.5));
        assert_eq!(Value::Int(3).as_f32(), Some(3.0));
        assert_eq!(Value::Bool(true).as_f32(), None);
    }

    #[test]
    fn test_malformed_reads_are_none() {
        let value = Value::String("bright".to_string());
        assert!(value.as_f32().is_none());
        assert!(value.as_vec3().is_none());
        assert!(value.as_matrix4().is_none());
        assert_eq!(value.as_asset_path(), Some(Path::new("bright")));
    }
}
