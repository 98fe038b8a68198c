//! Acceleration structure interface for light geometry
//!
//! Geometric lights (rect, disk, sphere, cylinder) mirror their emitting
//! surface into the ray tracer's acceleration scene so camera and shadow
//! rays can hit them. This module defines the world-space shape
//! descriptors handed to the scene and the trait an acceleration backend
//! implements.

pub mod software;

pub use software::{SceneStats, SoftwareScene};

use crate::foundation::math::{constants, Mat4, Point3, Vec3};
use thiserror::Error;

/// Scene-assigned geometry identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u32);

impl GeometryId {
    /// Sentinel for "no geometry registered"
    pub const INVALID: Self = Self(u32::MAX);

    /// Whether this id refers to registered geometry
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for GeometryId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Opaque handle to a geometry object owned by the acceleration scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Analytic primitive kinds an acceleration scene must support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Planar quadrilateral
    Quad,
    /// Sphere
    Sphere,
    /// Flat disk
    Disk,
    /// Open cylinder
    Cylinder,
}

/// World-space light geometry
#[derive(Debug, Clone, PartialEq)]
pub enum LightGeometry {
    /// Quad with corners in winding order
    Quad {
        /// Corner positions
        corners: [Point3; 4],
    },
    /// Sphere
    Sphere {
        /// Center
        center: Point3,
        /// Radius
        radius: f32,
    },
    /// Disk facing `normal`
    Disk {
        /// Center
        center: Point3,
        /// Unit normal
        normal: Vec3,
        /// Radius
        radius: f32,
    },
    /// Cylinder along the local X axis of `xform`, centered at its origin
    Cylinder {
        /// Light-to-world transform baked into the primitive
        xform: Mat4,
        /// Local radius
        radius: f32,
        /// Local length
        length: f32,
    },
}

impl LightGeometry {
    /// Primitive kind
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Quad { .. } => GeometryKind::Quad,
            Self::Sphere { .. } => GeometryKind::Sphere,
            Self::Disk { .. } => GeometryKind::Disk,
            Self::Cylinder { .. } => GeometryKind::Cylinder,
        }
    }

    /// World-space surface area
    pub fn area(&self) -> f32 {
        match self {
            Self::Quad { corners } => {
                // Two triangles, so skewed quads are measured correctly
                let a = (corners[1] - corners[0]).cross(&(corners[2] - corners[0])).norm();
                let b = (corners[2] - corners[0]).cross(&(corners[3] - corners[0])).norm();
                0.5 * (a + b)
            }
            Self::Sphere { radius, .. } => 2.0 * constants::TAU * radius * radius,
            Self::Disk { radius, .. } => constants::PI * radius * radius,
            Self::Cylinder { xform, radius, length } => {
                let axis = xform.fixed_view::<3, 1>(0, 0).norm();
                let ring = xform
                    .fixed_view::<3, 1>(0, 1)
                    .norm()
                    .max(xform.fixed_view::<3, 1>(0, 2).norm());
                constants::TAU * radius * ring * length * axis
            }
        }
    }

    /// World-space position the primitive is anchored at
    pub fn origin(&self) -> Point3 {
        match self {
            Self::Quad { corners } => {
                Point3::from((corners[0].coords + corners[1].coords + corners[2].coords + corners[3].coords) * 0.25)
            }
            Self::Sphere { center, .. } | Self::Disk { center, .. } => *center,
            Self::Cylinder { xform, .. } => xform.transform_point(&Point3::origin()),
        }
    }
}

/// Acceleration scene errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccelError {
    /// The scene cannot hold more geometry
    #[error("Acceleration scene is full ({capacity} geometries)")]
    ResourceExhausted {
        /// Configured capacity
        capacity: usize,
    },

    /// The handle does not name live geometry
    #[error("Stale geometry handle: {0:?}")]
    StaleHandle(GeometryHandle),

    /// In-place updates cannot change the primitive kind
    #[error("Cannot update {existing:?} geometry with {requested:?}")]
    KindMismatch {
        /// Kind of the stored primitive
        existing: GeometryKind,
        /// Kind of the replacement
        requested: GeometryKind,
    },
}

/// Result type for acceleration scene operations
pub type AccelResult<T> = Result<T, AccelError>;

/// A ray tracer's acceleration scene, as seen by lights
///
/// Callers serialize access; implementations need no internal locking.
pub trait AccelerationScene {
    /// Create, commit and attach a primitive
    fn attach_geometry(&mut self, geometry: &LightGeometry) -> AccelResult<(GeometryId, GeometryHandle)>;

    /// Replace the data of an attached primitive of the same kind
    fn update_geometry(&mut self, handle: GeometryHandle, geometry: &LightGeometry) -> AccelResult<()>;

    /// Detach and release a primitive; unknown ids are ignored
    fn detach_geometry(&mut self, id: GeometryId, handle: GeometryHandle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sentinel() {
        assert!(!GeometryId::INVALID.is_valid());
        assert!(!GeometryId::default().is_valid());
        assert!(GeometryId(0).is_valid());
    }

    #[test]
    fn test_areas() {
        let quad = LightGeometry::Quad {
            corners: [
                Point3::new(-1.0, -0.5, 0.0),
                Point3::new(1.0, -0.5, 0.0),
                Point3::new(1.0, 0.5, 0.0),
                Point3::new(-1.0, 0.5, 0.0),
            ],
        };
        assert_relative_eq!(quad.area(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(quad.origin(), Point3::origin(), epsilon = 1e-6);

        let sphere = LightGeometry::Sphere { center: Point3::origin(), radius: 1.0 };
        assert_relative_eq!(sphere.area(), 4.0 * constants::PI, epsilon = 1e-5);

        let cylinder = LightGeometry::Cylinder { xform: Mat4::identity(), radius: 0.5, length: 2.0 };
        assert_relative_eq!(cylinder.area(), 2.0 * constants::PI, epsilon = 1e-5);
    }
}
