//! Angular shaping of light emission

use crate::assets::IesProfile;
use crate::foundation::math::{constants, utils, Vec3};
use std::path::PathBuf;
use std::sync::Arc;

/// IES profile attached to a light
///
/// Without a profile the record is inert: evaluation returns 1 and the
/// normalize flag and angle scale have no effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IesShaping {
    /// Parsed profile, shared between record snapshots
    pub profile: Option<Arc<IesProfile>>,
    /// Authored file the profile was read from
    pub source: Option<PathBuf>,
    /// Divide by the profile's peak candela
    pub normalize: bool,
    /// Rescales the vertical angle of the profile
    pub angle_scale: f32,
}

impl IesShaping {
    /// Whether a profile is loaded
    pub fn is_active(&self) -> bool {
        self.profile.is_some()
    }

    /// Profile multiplier for a direction given as vertical/horizontal
    /// angles in degrees
    pub fn eval(&self, theta: f32, phi: f32) -> f32 {
        self.profile
            .as_ref()
            .map_or(1.0, |profile| profile.eval_shaped(theta, phi, self.angle_scale, self.normalize))
    }
}

/// Focus, cone and IES shaping parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Shaping {
    /// Tint applied off the focus axis
    pub focus_tint: Vec3,
    /// Focus exponent
    pub focus: f32,
    /// Cone half-angle in degrees; 180 leaves emission unrestricted
    pub cone_angle: f32,
    /// Fraction of the cone over which emission fades out
    pub cone_softness: f32,
    /// Photometric profile
    pub ies: IesShaping,
}

impl Default for Shaping {
    fn default() -> Self {
        Self {
            focus_tint: Vec3::zeros(),
            focus: 0.0,
            cone_angle: 180.0,
            cone_softness: 0.0,
            ies: IesShaping::default(),
        }
    }
}

impl Shaping {
    /// Whether the cone restricts emission at all
    pub fn has_cone(&self) -> bool {
        self.cone_angle < 180.0
    }

    /// Cone attenuation for a direction `angle_degrees` off the light axis
    pub fn cone_attenuation(&self, angle_degrees: f32) -> f32 {
        if !self.has_cone() {
            return 1.0;
        }
        let cone = self.cone_angle.max(0.0);
        if angle_degrees > cone {
            return 0.0;
        }
        let softness = self.cone_softness.clamp(0.0, 1.0);
        let inner = cone * (1.0 - softness);
        if angle_degrees <= inner || cone <= inner {
            return 1.0;
        }

        let cos_angle = (angle_degrees * constants::DEG_TO_RAD).cos();
        let cos_outer = (cone * constants::DEG_TO_RAD).cos();
        let cos_inner = (inner * constants::DEG_TO_RAD).cos();
        smoothstep(cos_outer, cos_inner, cos_angle)
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    utils::lerp(0.0, 1.0, t * t * (3.0 - 2.0 * t))
}
