//! Light shape kinds and their parameters
//!
//! The set of shapes is closed: a light's kind is decided from its declared
//! prim type when it is created and never changes afterwards. Only the
//! parameters inside the active variant are re-read on sync.

use crate::accel::LightGeometry;
use crate::foundation::math::{constants, utils, Mat3, Mat4, Point3, Vec3};
use crate::scene::tokens;

/// Shape kind without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// Unsupported prim type
    Unknown,
    /// Cylinder light
    Cylinder,
    /// Disk light
    Disk,
    /// Distant (directional) light
    Distant,
    /// Dome (environment) light
    Dome,
    /// Rect light
    Rect,
    /// Sphere light
    Sphere,
}

impl LightKind {
    /// Map a declared prim type to a kind
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            tokens::CYLINDER_LIGHT => Self::Cylinder,
            tokens::DISK_LIGHT => Self::Disk,
            tokens::DISTANT_LIGHT => Self::Distant,
            tokens::DOME_LIGHT => Self::Dome,
            tokens::RECT_LIGHT => Self::Rect,
            tokens::SPHERE_LIGHT => Self::Sphere,
            _ => Self::Unknown,
        }
    }

    /// Whether lights of this kind own a primitive in the acceleration scene
    pub fn is_geometric(self) -> bool {
        matches!(self, Self::Cylinder | Self::Disk | Self::Rect | Self::Sphere)
    }

    /// Whether lights of this kind read a texture
    pub fn is_textured(self) -> bool {
        matches!(self, Self::Dome | Self::Rect)
    }
}

/// Cylinder along the local X axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    /// Radius
    pub radius: f32,
    /// Length along X
    pub length: f32,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self { radius: 0.5, length: 1.0 }
    }
}

/// Disk in the local XY plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    /// Radius
    pub radius: f32,
}

impl Default for Disk {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Directional light with an angular size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distant {
    /// Half of the subtended angle, in radians
    pub half_angle_radians: f32,
}

impl Distant {
    /// Angular diameter authored when nothing else is, in degrees
    pub const DEFAULT_ANGLE_DEGREES: f32 = 0.53;

    /// Build from an angular diameter in degrees
    pub fn from_angle_degrees(angle: f32) -> Self {
        Self { half_angle_radians: utils::deg_to_rad(angle) * 0.5 }
    }
}

impl Default for Distant {
    fn default() -> Self {
        Self::from_angle_degrees(Self::DEFAULT_ANGLE_DEGREES)
    }
}

/// Rectangle in the local XY plane, centered at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Default for Rect {
    fn default() -> Self {
        Self { width: 1.0, height: 1.0 }
    }
}

/// Sphere centered at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Radius
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// The active shape of a light and its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeVariant {
    /// Unsupported; contributes no geometric sampling
    Unknown,
    /// Cylinder
    Cylinder(Cylinder),
    /// Disk
    Disk(Disk),
    /// Distant
    Distant(Distant),
    /// Dome
    Dome,
    /// Rect
    Rect(Rect),
    /// Sphere
    Sphere(Sphere),
}

impl ShapeVariant {
    /// Variant of `kind` with default parameters
    pub fn for_kind(kind: LightKind) -> Self {
        match kind {
            LightKind::Unknown => Self::Unknown,
            LightKind::Cylinder => Self::Cylinder(Cylinder::default()),
            LightKind::Disk => Self::Disk(Disk::default()),
            LightKind::Distant => Self::Distant(Distant::default()),
            LightKind::Dome => Self::Dome,
            LightKind::Rect => Self::Rect(Rect::default()),
            LightKind::Sphere => Self::Sphere(Sphere::default()),
        }
    }

    /// Kind of the active variant
    pub fn kind(&self) -> LightKind {
        match self {
            Self::Unknown => LightKind::Unknown,
            Self::Cylinder(_) => LightKind::Cylinder,
            Self::Disk(_) => LightKind::Disk,
            Self::Distant(_) => LightKind::Distant,
            Self::Dome => LightKind::Dome,
            Self::Rect(_) => LightKind::Rect,
            Self::Sphere(_) => LightKind::Sphere,
        }
    }

    /// World-space primitive for geometric kinds
    pub fn world_geometry(&self, xform: &Mat4, normal_xform: &Mat3) -> Option<LightGeometry> {
        match self {
            Self::Unknown | Self::Distant(_) | Self::Dome => None,
            Self::Rect(rect) => {
                let (hw, hh) = (rect.width * 0.5, rect.height * 0.5);
                let corners = [
                    Point3::new(-hw, -hh, 0.0),
                    Point3::new(hw, -hh, 0.0),
                    Point3::new(hw, hh, 0.0),
                    Point3::new(-hw, hh, 0.0),
                ]
                .map(|p| xform.transform_point(&p));
                Some(LightGeometry::Quad { corners })
            }
            Self::Sphere(sphere) => Some(LightGeometry::Sphere {
                center: xform.transform_point(&Point3::origin()),
                radius: sphere.radius * utils::max_axis_scale(xform),
            }),
            Self::Disk(disk) => {
                let scales = utils::axis_scales(xform);
                let normal = (normal_xform * Vec3::z()).try_normalize(f32::EPSILON)?;
                Some(LightGeometry::Disk {
                    center: xform.transform_point(&Point3::origin()),
                    normal,
                    radius: disk.radius * scales.x.max(scales.y),
                })
            }
            Self::Cylinder(cylinder) => Some(LightGeometry::Cylinder {
                xform: *xform,
                radius: cylinder.radius,
                length: cylinder.length,
            }),
        }
    }

    /// Measure intensity is divided by when the light is normalized:
    /// world-space area for geometric kinds, subtended solid angle for
    /// distant lights and the full sphere for domes
    pub fn normalization_measure(&self, xform: &Mat4, normal_xform: &Mat3) -> Option<f32> {
        let measure = match self {
            Self::Unknown => return None,
            Self::Dome => constants::FOUR_PI,
            Self::Distant(distant) => constants::TAU * (1.0 - distant.half_angle_radians.cos()),
            _ => self.world_geometry(xform, normal_xform)?.area(),
        };
        (measure > 0.0 && measure.is_finite()).then_some(measure)
    }
}
