//! Collection of lights driven by a change tracker

use super::RenderParam;
use crate::accel::AccelerationScene;
use crate::light::Light;
use crate::scene::{ChangeTracker, DirtyBits, PrimPath, SceneDelegate};
use std::collections::HashMap;

/// Every light prim of a scene, keyed by path
///
/// Owns the change tracker for its lights: inserting a light registers it
/// with its initial dirty bits and [`LightSet::sync`] visits only prims
/// with light categories dirty.
#[derive(Debug, Default)]
pub struct LightSet {
    lights: HashMap<PrimPath, Light>,
    tracker: ChangeTracker,
}

impl LightSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a light for a prim, replacing (and finalizing) any light
    /// already at that path
    pub fn insert<S: AccelerationScene>(
        &mut self,
        path: PrimPath,
        type_name: &str,
        render_param: &mut RenderParam<S>,
    ) -> &Light {
        if let Some(mut previous) = self.lights.remove(&path) {
            log::debug!("Replacing light {}", path);
            previous.finalize(render_param);
        }

        let light = Light::new(path.clone(), type_name);
        self.tracker.insert(path.clone(), light.initial_dirty_bits());
        self.lights.entry(path).or_insert(light)
    }

    /// Finalize and drop a light; returns whether it existed
    pub fn remove<S: AccelerationScene>(&mut self, path: &PrimPath, render_param: &mut RenderParam<S>) -> bool {
        self.tracker.remove(path);
        match self.lights.remove(path) {
            Some(mut light) => {
                light.finalize(render_param);
                true
            }
            None => false,
        }
    }

    /// Flag categories of a light as changed
    pub fn mark_dirty(&mut self, path: &PrimPath, bits: DirtyBits) {
        self.tracker.mark_dirty(path, bits);
    }

    /// Change tracker for the lights in this set
    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Sync every dirty light in path order; returns how many were visited
    pub fn sync<D, S>(&mut self, delegate: &D, render_param: &mut RenderParam<S>) -> usize
    where
        D: SceneDelegate + ?Sized,
        S: AccelerationScene,
    {
        let dirty = self.tracker.dirty_paths();
        for path in &dirty {
            let Some(light) = self.lights.get_mut(path) else {
                continue;
            };
            let mut bits = self.tracker.dirty_bits(path);
            light.sync(delegate, render_param, &mut bits);
            self.tracker.set_dirty_bits(path, bits);
        }
        if !dirty.is_empty() {
            log::debug!("Synced {} light(s)", dirty.len());
        }
        dirty.len()
    }

    /// Light at a path
    pub fn get(&self, path: &PrimPath) -> Option<&Light> {
        self.lights.get(path)
    }

    /// All lights, in no particular order
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.values()
    }

    /// Environment lights
    pub fn dome_lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.values().filter(|light| light.is_dome())
    }

    /// Number of lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Finalize and drop every light
    pub fn finalize_all<S: AccelerationScene>(&mut self, render_param: &mut RenderParam<S>) {
        for (path, mut light) in self.lights.drain() {
            self.tracker.remove(&path);
            light.finalize(render_param);
        }
    }
}
