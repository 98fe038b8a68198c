//! The renderer-facing light record

use super::color::blackbody_tint;
use super::shape::{LightKind, ShapeVariant};
use super::shaping::Shaping;
use super::texture::LightTexture;
use crate::accel::{GeometryHandle, GeometryId};
use crate::foundation::math::{Mat3, Mat4, Vec3};

/// Snapshot of everything shading code needs to sample a light
///
/// Owned by its [`Light`](super::Light) and published read-only. Fields
/// change only inside a successful sync, so consumers may compare
/// snapshots to detect their own changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LightData {
    /// Light-to-world transform
    pub xform_light_to_world: Mat4,
    /// Inverse of `xform_light_to_world`
    pub xform_world_to_light: Mat4,
    /// Inverse-transpose of the upper 3x3 of `xform_light_to_world`
    pub normal_xform_light_to_world: Mat3,
    /// Linear RGB color
    pub color: Vec3,
    /// Texture modulating rect and dome lights
    pub texture: LightTexture,
    /// Intensity multiplier
    pub intensity: f32,
    /// Diffuse contribution multiplier
    pub diffuse: f32,
    /// Exposure in stops, applied as `2^exposure`
    pub exposure: f32,
    /// Blackbody temperature in Kelvin
    pub color_temperature: f32,
    /// Whether the blackbody tint is applied
    pub enable_color_temperature: bool,
    /// Active shape and its parameters
    pub shape: ShapeVariant,
    /// Divide intensity by the emitting area or solid angle
    pub normalize: bool,
    /// Overall visibility
    pub visible: bool,
    /// Visible to camera rays
    pub visible_camera: bool,
    /// Visible to shadow rays
    pub visible_shadow: bool,
    /// Angular shaping
    pub shaping: Shaping,
    /// Acceleration scene id, `GeometryId::INVALID` when unregistered
    pub geometry_id: GeometryId,
    /// Acceleration scene handle, `None` when unregistered
    pub geometry: Option<GeometryHandle>,
}

impl LightData {
    /// Record with schema defaults for a light of `kind`
    pub fn new(kind: LightKind) -> Self {
        Self {
            xform_light_to_world: Mat4::identity(),
            xform_world_to_light: Mat4::identity(),
            normal_xform_light_to_world: Mat3::identity(),
            color: Vec3::new(1.0, 1.0, 1.0),
            texture: LightTexture::default(),
            intensity: 1.0,
            diffuse: 1.0,
            exposure: 0.0,
            color_temperature: 6500.0,
            enable_color_temperature: false,
            shape: ShapeVariant::for_kind(kind),
            normalize: false,
            visible: true,
            visible_camera: true,
            visible_shadow: true,
            shaping: Shaping::default(),
            geometry_id: GeometryId::INVALID,
            geometry: None,
        }
    }

    /// Shape kind
    pub fn kind(&self) -> LightKind {
        self.shape.kind()
    }

    /// Whether this is an environment light
    pub fn is_dome(&self) -> bool {
        matches!(self.shape, ShapeVariant::Dome)
    }

    /// Whether the shape owns acceleration geometry
    pub fn is_geometric(&self) -> bool {
        self.kind().is_geometric()
    }

    /// Whether a primitive is registered in the acceleration scene
    pub fn has_geometry(&self) -> bool {
        self.geometry_id.is_valid()
    }

    /// Whether a texture is loaded
    pub fn has_texture(&self) -> bool {
        self.texture.is_present()
    }

    /// Whether an IES profile is loaded
    pub fn has_ies(&self) -> bool {
        self.shaping.ies.is_active()
    }

    /// Color multiplier from the color temperature; white when disabled
    pub fn color_temperature_tint(&self) -> Vec3 {
        if self.enable_color_temperature {
            blackbody_tint(self.color_temperature)
        } else {
            Vec3::new(1.0, 1.0, 1.0)
        }
    }

    /// Area or solid angle intensity is divided by when normalizing
    pub fn normalization_measure(&self) -> Option<f32> {
        self.shape
            .normalization_measure(&self.xform_light_to_world, &self.normal_xform_light_to_world)
    }

    /// Scalar emission: intensity and exposure, normalized if requested
    pub fn emission_scale(&self) -> f32 {
        let scale = self.intensity * self.exposure.exp2();
        match self.normalization_measure() {
            Some(measure) if self.normalize => scale / measure,
            _ => scale,
        }
    }

    /// Emitted radiance: color, temperature tint and emission scale
    pub fn radiance(&self) -> Vec3 {
        self.color.component_mul(&self.color_temperature_tint()) * self.emission_scale()
    }
}
