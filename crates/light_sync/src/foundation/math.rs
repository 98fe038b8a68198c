//! Math utilities and types
//!
//! Provides the matrix and vector aliases used by light records and the
//! transform derivations every light needs after a transform change.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform from a translation vector
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// 4 * Pi, the solid angle of the full sphere
    pub const FOUR_PI: f32 = 4.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Upper-left 3x3 block of a homogeneous transform
    pub fn upper3x3(matrix: &Mat4) -> Mat3 {
        matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Invert a 4x4 transform, rejecting singular and non-finite matrices
    ///
    /// Tiny but regular scales are accepted as long as the inverse stays
    /// finite.
    pub fn try_inverse(matrix: &Mat4) -> Option<Mat4> {
        if !matrix.iter().all(|v| v.is_finite()) {
            return None;
        }
        matrix
            .try_inverse()
            .filter(|inverse| inverse.iter().all(|v| v.is_finite()))
    }

    /// Matrix that carries normals through `matrix`: the inverse-transpose
    /// of its upper 3x3 block
    pub fn normal_matrix(matrix: &Mat4) -> Option<Mat3> {
        upper3x3(matrix)
            .try_inverse()
            .filter(|inverse| inverse.iter().all(|v| v.is_finite()))
            .map(|inverse| inverse.transpose())
    }

    /// Length of the transformed local X, Y and Z axes
    pub fn axis_scales(matrix: &Mat4) -> Vec3 {
        Vec3::new(
            matrix.fixed_view::<3, 1>(0, 0).norm(),
            matrix.fixed_view::<3, 1>(0, 1).norm(),
            matrix.fixed_view::<3, 1>(0, 2).norm(),
        )
    }

    /// Largest axis scale, used to size radius-driven shapes
    pub fn max_axis_scale(matrix: &Mat4) -> f32 {
        axis_scales(matrix).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.7);
        let matrix = Transform::default().with_rotation(rotation).to_matrix();

        let normal = utils::normal_matrix(&matrix).unwrap();
        assert_relative_eq!(normal, utils::upper3x3(&matrix), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        let matrix = Transform::default()
            .with_scale(Vec3::new(2.0, 1.0, 4.0))
            .to_matrix();

        let normal = utils::normal_matrix(&matrix).unwrap();
        assert_relative_eq!(normal[(0, 0)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(normal[(1, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(normal[(2, 2)], 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_try_inverse_rejects_singular() {
        let matrix = Transform::default()
            .with_scale(Vec3::new(1.0, 0.0, 1.0))
            .to_matrix();
        assert!(utils::try_inverse(&matrix).is_none());

        let mut nan = Mat4::identity();
        nan[(0, 3)] = f32::NAN;
        assert!(utils::try_inverse(&nan).is_none());
    }

    #[test]
    fn test_try_inverse_accepts_small_uniform_scale() {
        let matrix = Transform::default()
            .with_scale(Vec3::new(1e-4, 1e-4, 1e-4))
            .to_matrix();
        let inverse = utils::try_inverse(&matrix).unwrap();
        assert_relative_eq!(inverse[(0, 0)], 1e4, max_relative = 1e-4);
        assert_relative_eq!(matrix * inverse, Mat4::identity(), epsilon = 1e-4);
    }

    #[test]
    fn test_axis_scales() {
        let matrix = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0))
            .with_scale(Vec3::new(1.0, 3.0, 2.0))
            .to_matrix();
        assert_relative_eq!(utils::axis_scales(&matrix), Vec3::new(1.0, 3.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(utils::max_axis_scale(&matrix), 3.0, epsilon = 1e-6);
    }
}
