//! Acceleration scene registration for geometric lights

use super::Light;
use crate::accel::{AccelerationScene, GeometryId};
use crate::render::RenderParam;

impl Light {
    /// Bring the registered primitive in line with the record
    ///
    /// Invisible lights and shapes without a surface hold no primitive. An
    /// unchanged descriptor costs no scene call.
    pub(super) fn populate_geometry<S: AccelerationScene>(&mut self, render_param: &mut RenderParam<S>) {
        let desired = if self.data.visible {
            self.data
                .shape
                .world_geometry(&self.data.xform_light_to_world, &self.data.normal_xform_light_to_world)
        } else {
            None
        };

        let Some(geometry) = desired else {
            if self.data.geometry.is_some() {
                log::debug!("Releasing geometry of hidden light {}", self.path);
                self.release_geometry(render_param.acquire_scene_for_edit());
            }
            return;
        };

        if self.data.geometry.is_some() && self.baked.as_ref() == Some(&geometry) {
            return;
        }

        let scene = render_param.acquire_scene_for_edit();
        match self.data.geometry {
            Some(handle) => match scene.update_geometry(handle, &geometry) {
                Ok(()) => {
                    log::trace!("Updated {:?} geometry of light {}", geometry.kind(), self.path);
                    self.baked = Some(geometry);
                }
                Err(err) => {
                    log::warn!("Geometry update for light {} failed, detaching: {}", self.path, err);
                    self.release_geometry(scene);
                }
            },
            None => match scene.attach_geometry(&geometry) {
                Ok((id, handle)) => {
                    log::debug!("Attached {:?} geometry {:?} for light {}", geometry.kind(), id, self.path);
                    self.data.geometry_id = id;
                    self.data.geometry = Some(handle);
                    self.baked = Some(geometry);
                }
                Err(err) => {
                    log::warn!("No geometry for light {}: {}", self.path, err);
                    self.data.geometry_id = GeometryId::INVALID;
                }
            },
        }
    }

    pub(super) fn release_geometry<S: AccelerationScene>(&mut self, scene: &mut S) {
        if let Some(handle) = self.data.geometry.take() {
            scene.detach_geometry(self.data.geometry_id, handle);
        }
        self.data.geometry_id = GeometryId::INVALID;
        self.baked = None;
    }
}
