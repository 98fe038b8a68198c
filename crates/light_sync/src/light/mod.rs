//! Light prims and their synchronization
//!
//! A [`Light`] owns one [`LightData`] record and keeps it in step with the
//! scene. Each sync reads only the attribute categories flagged in the
//! dirty mask, stages the new record on a copy and commits it only when
//! every read succeeded. Geometric lights additionally mirror their
//! emitting surface into the acceleration scene.
//!
//! ```text
//! Uninitialized --sync--> Synced --sync--> Synced
//!       |                   |
//!       +----finalize-------+----> Finalized (terminal)
//! ```

pub mod color;
pub mod data;
mod geometry;
mod params;
pub mod shape;
pub mod shaping;
pub mod texture;

pub use data::LightData;
pub use shape::{LightKind, ShapeVariant};
pub use shaping::{IesShaping, Shaping};
pub use texture::LightTexture;

use crate::accel::{AccelerationScene, LightGeometry};
use crate::assets::ResourceLoader;
use crate::foundation::math::utils;
use crate::render::RenderParam;
use crate::scene::{tokens, DirtyBits, PrimPath, SceneDelegate};
use params::AttributeReader;
use shape::{Cylinder, Disk, Distant, Rect, Sphere};
use std::sync::Arc;
use thiserror::Error;

/// Errors that abort a sync and leave the record untouched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    /// The authored transform has no inverse
    #[error("Light transform is not invertible")]
    NonInvertibleTransform,

    /// The authored transform contains NaN or infinity
    #[error("Light transform has non-finite entries")]
    NonFiniteTransform,
}

/// Lifecycle of a light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Created, never successfully synced
    Uninitialized,
    /// Record reflects the scene as of the last sync
    Synced,
    /// Resources released; further syncs are ignored
    Finalized,
}

/// A light prim as seen by the renderer
#[derive(Debug)]
pub struct Light {
    path: PrimPath,
    data: LightData,
    state: SyncState,
    /// Descriptor last handed to the acceleration scene
    baked: Option<LightGeometry>,
}

impl Light {
    /// Create a light for a prim of the given declared type
    ///
    /// Unsupported types yield an [`LightKind::Unknown`] light that syncs
    /// parameters but never produces geometry.
    pub fn new(path: PrimPath, type_name: &str) -> Self {
        let kind = LightKind::from_type_name(type_name);
        if kind == LightKind::Unknown {
            log::warn!("Unsupported light type '{}' for {}", type_name, path);
        }
        Self::with_kind(path, kind)
    }

    /// Create a light of a known kind
    pub fn with_kind(path: PrimPath, kind: LightKind) -> Self {
        log::debug!("Created {:?} light {}", kind, path);
        Self {
            path,
            data: LightData::new(kind),
            state: SyncState::Uninitialized,
            baked: None,
        }
    }

    /// Prim path
    pub fn path(&self) -> &PrimPath {
        &self.path
    }

    /// Shape kind, fixed at construction
    pub fn kind(&self) -> LightKind {
        self.data.kind()
    }

    /// Published light record
    pub fn data(&self) -> &LightData {
        &self.data
    }

    /// Lifecycle state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Whether this is an environment light
    pub fn is_dome(&self) -> bool {
        self.data.is_dome()
    }

    /// World-space primitive currently registered for this light
    pub fn geometry(&self) -> Option<&LightGeometry> {
        self.baked.as_ref()
    }

    /// Dirty bits a newly inserted light starts with
    pub fn initial_dirty_bits(&self) -> DirtyBits {
        DirtyBits::ALL_DIRTY
    }

    /// Pull dirty state from the scene into the record
    ///
    /// Light categories are cleared from `dirty_bits` whether or not the
    /// sync succeeded; other bits are left for their owners. Failures are
    /// logged and keep the previous record.
    pub fn sync<D, S>(&mut self, delegate: &D, render_param: &mut RenderParam<S>, dirty_bits: &mut DirtyBits)
    where
        D: SceneDelegate + ?Sized,
        S: AccelerationScene,
    {
        if self.state == SyncState::Finalized {
            log::warn!("Ignoring sync of finalized light {}", self.path);
            return;
        }

        let bits = *dirty_bits & DirtyBits::ALL_DIRTY;
        if bits.is_empty() {
            return;
        }
        log::trace!("Syncing light {} ({:?})", self.path, bits);

        match self.try_sync(delegate, render_param.loader(), bits) {
            Ok(staged) => {
                self.data = staged;
                if self.kind().is_geometric() && bits.affects_geometry() {
                    self.populate_geometry(render_param);
                }
                self.state = SyncState::Synced;
            }
            Err(err) => {
                log::error!("Sync of light {} aborted, keeping previous state: {}", self.path, err);
            }
        }

        dirty_bits.remove(DirtyBits::ALL_DIRTY);
    }

    fn try_sync<D>(&self, delegate: &D, loader: &dyn ResourceLoader, bits: DirtyBits) -> Result<LightData, LightError>
    where
        D: SceneDelegate + ?Sized,
    {
        let attrs = AttributeReader::new(delegate, &self.path);
        let mut staged = self.data.clone();

        if bits.contains(DirtyBits::DIRTY_TRANSFORM) {
            read_transform(&attrs, &mut staged)?;
        }
        if bits.contains(DirtyBits::DIRTY_PARAMS) {
            read_params(&attrs, &mut staged);
        }
        if bits.intersects(DirtyBits::DIRTY_PARAMS | DirtyBits::DIRTY_RESOURCE) {
            let force = bits.contains(DirtyBits::DIRTY_RESOURCE);
            read_texture(&attrs, loader, &mut staged, force);
            read_ies(&attrs, loader, &mut staged, force);
        }
        if bits.contains(DirtyBits::DIRTY_VISIBILITY) {
            read_visibility(&attrs, &mut staged);
        }

        Ok(staged)
    }

    /// Release acceleration resources; the light ignores further syncs
    ///
    /// Safe to call more than once.
    pub fn finalize<S: AccelerationScene>(&mut self, render_param: &mut RenderParam<S>) {
        if self.data.geometry.is_some() {
            self.release_geometry(render_param.acquire_scene_for_edit());
        }
        if self.state != SyncState::Finalized {
            log::debug!("Finalized light {}", self.path);
        }
        self.state = SyncState::Finalized;
    }
}

impl Drop for Light {
    fn drop(&mut self) {
        if let Some(handle) = self.data.geometry {
            log::warn!(
                "Light {} dropped without finalize; geometry {:?} leaked",
                self.path,
                handle
            );
        }
    }
}

fn read_transform<D: SceneDelegate + ?Sized>(
    attrs: &AttributeReader<'_, D>,
    staged: &mut LightData,
) -> Result<(), LightError> {
    let Some(xform) = attrs.transform() else {
        return Ok(());
    };
    if xform.iter().any(|x| !x.is_finite()) {
        return Err(LightError::NonFiniteTransform);
    }
    let inverse = utils::try_inverse(&xform).ok_or(LightError::NonInvertibleTransform)?;
    let normal = utils::normal_matrix(&xform).ok_or(LightError::NonInvertibleTransform)?;

    staged.xform_light_to_world = xform;
    staged.xform_world_to_light = inverse;
    staged.normal_xform_light_to_world = normal;
    Ok(())
}

fn read_params<D: SceneDelegate + ?Sized>(attrs: &AttributeReader<'_, D>, staged: &mut LightData) {
    let defaults = LightData::new(staged.kind());

    if let Some(color) = attrs.color(tokens::COLOR, defaults.color) {
        staged.color = color;
    }
    if let Some(intensity) = attrs.float(tokens::INTENSITY, defaults.intensity) {
        staged.intensity = intensity;
    }
    if let Some(diffuse) = attrs.float(tokens::DIFFUSE, defaults.diffuse) {
        staged.diffuse = diffuse;
    }
    if let Some(exposure) = attrs.float(tokens::EXPOSURE, defaults.exposure) {
        staged.exposure = exposure;
    }
    if let Some(temperature) = attrs.float(tokens::COLOR_TEMPERATURE, defaults.color_temperature) {
        staged.color_temperature = temperature;
    }
    if let Some(enable) = attrs.boolean(tokens::ENABLE_COLOR_TEMPERATURE, defaults.enable_color_temperature) {
        staged.enable_color_temperature = enable;
    }
    if let Some(normalize) = attrs.boolean(tokens::NORMALIZE, defaults.normalize) {
        staged.normalize = normalize;
    }

    staged.shape = read_shape(attrs, staged.shape);

    let shaping = &mut staged.shaping;
    let fallback = defaults.shaping;
    if let Some(focus) = attrs.float(tokens::SHAPING_FOCUS, fallback.focus) {
        shaping.focus = focus;
    }
    if let Some(tint) = attrs.color(tokens::SHAPING_FOCUS_TINT, fallback.focus_tint) {
        shaping.focus_tint = tint;
    }
    if let Some(angle) = attrs.float(tokens::SHAPING_CONE_ANGLE, fallback.cone_angle) {
        shaping.cone_angle = angle;
    }
    if let Some(softness) = attrs.float(tokens::SHAPING_CONE_SOFTNESS, fallback.cone_softness) {
        shaping.cone_softness = softness;
    }
    if let Some(scale) = attrs.float(tokens::SHAPING_IES_ANGLE_SCALE, fallback.ies.angle_scale) {
        shaping.ies.angle_scale = scale;
    }
    if let Some(normalize) = attrs.boolean(tokens::SHAPING_IES_NORMALIZE, fallback.ies.normalize) {
        shaping.ies.normalize = normalize;
    }
}

/// Re-read the parameters of the active alternative; the alternative
/// itself never changes
fn read_shape<D: SceneDelegate + ?Sized>(attrs: &AttributeReader<'_, D>, current: ShapeVariant) -> ShapeVariant {
    match current {
        ShapeVariant::Unknown => ShapeVariant::Unknown,
        ShapeVariant::Dome => ShapeVariant::Dome,
        ShapeVariant::Cylinder(c) => {
            let d = Cylinder::default();
            ShapeVariant::Cylinder(Cylinder {
                radius: attrs.extent(tokens::RADIUS, d.radius).unwrap_or(c.radius),
                length: attrs.extent(tokens::LENGTH, d.length).unwrap_or(c.length),
            })
        }
        ShapeVariant::Disk(c) => ShapeVariant::Disk(Disk {
            radius: attrs.extent(tokens::RADIUS, Disk::default().radius).unwrap_or(c.radius),
        }),
        ShapeVariant::Distant(c) => ShapeVariant::Distant(
            attrs
                .extent(tokens::ANGLE, Distant::DEFAULT_ANGLE_DEGREES)
                .map_or(c, Distant::from_angle_degrees),
        ),
        ShapeVariant::Rect(c) => {
            let d = Rect::default();
            ShapeVariant::Rect(Rect {
                width: attrs.extent(tokens::WIDTH, d.width).unwrap_or(c.width),
                height: attrs.extent(tokens::HEIGHT, d.height).unwrap_or(c.height),
            })
        }
        ShapeVariant::Sphere(c) => ShapeVariant::Sphere(Sphere {
            radius: attrs.extent(tokens::RADIUS, Sphere::default().radius).unwrap_or(c.radius),
        }),
    }
}

fn read_texture<D: SceneDelegate + ?Sized>(
    attrs: &AttributeReader<'_, D>,
    loader: &dyn ResourceLoader,
    staged: &mut LightData,
    force: bool,
) {
    if !staged.kind().is_textured() {
        return;
    }
    let Some(source) = attrs.asset(tokens::TEXTURE_FILE) else {
        return;
    };
    if !force && source == staged.texture.source {
        return;
    }

    staged.texture = match &source {
        None => LightTexture::absent(None),
        Some(path) => match loader.load_texture(path) {
            Ok(image) => LightTexture::from_image(image, source.clone()),
            Err(err) => {
                log::warn!("Light {} texture disabled: {}", attrs.prim_path(), err);
                LightTexture::absent(source.clone())
            }
        },
    };
}

fn read_ies<D: SceneDelegate + ?Sized>(
    attrs: &AttributeReader<'_, D>,
    loader: &dyn ResourceLoader,
    staged: &mut LightData,
    force: bool,
) {
    let Some(source) = attrs.asset(tokens::SHAPING_IES_FILE) else {
        return;
    };
    let ies = &mut staged.shaping.ies;
    if !force && source == ies.source {
        return;
    }

    ies.profile = source.as_deref().and_then(|path| match loader.load_ies(path) {
        Ok(profile) => Some(Arc::new(profile)),
        Err(err) => {
            log::warn!("Light {} IES profile disabled: {}", attrs.prim_path(), err);
            None
        }
    });
    ies.source = source;
}

fn read_visibility<D: SceneDelegate + ?Sized>(attrs: &AttributeReader<'_, D>, staged: &mut LightData) {
    if let Some(visible) = attrs.visibility() {
        staged.visible = visible;
    }
    if let Some(camera) = attrs.boolean(tokens::VISIBILITY_CAMERA, true) {
        staged.visible_camera = camera;
    }
    if let Some(shadow) = attrs.boolean(tokens::VISIBILITY_SHADOW, true) {
        staged.visible_shadow = shadow;
    }
}
