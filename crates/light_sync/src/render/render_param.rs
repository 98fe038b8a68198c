//! Shared renderer state handed to every light sync

use crate::accel::{AccelerationScene, SoftwareScene};
use crate::assets::{FileResourceLoader, ResourceLoader};
use crate::core::LightSyncConfig;

/// Acceleration scene and asset loader shared by all lights
///
/// Lights borrow it mutably for the duration of a sync, which serializes
/// access to the scene without internal locking.
pub struct RenderParam<S: AccelerationScene = SoftwareScene> {
    scene: S,
    loader: Box<dyn ResourceLoader>,
    scene_version: u64,
}

impl<S: AccelerationScene> RenderParam<S> {
    /// Wrap a scene and a loader
    pub fn new(scene: S, loader: Box<dyn ResourceLoader>) -> Self {
        Self {
            scene,
            loader,
            scene_version: 0,
        }
    }

    /// Read-only access to the scene
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene; counts as a scene edit
    pub fn acquire_scene_for_edit(&mut self) -> &mut S {
        self.scene_version += 1;
        &mut self.scene
    }

    /// Asset loader
    pub fn loader(&self) -> &dyn ResourceLoader {
        self.loader.as_ref()
    }

    /// Number of scene edits so far; renderers restart progressive
    /// accumulation when it changes
    pub fn scene_version(&self) -> u64 {
        self.scene_version
    }

    /// Force a restart without touching the scene
    pub fn invalidate(&mut self) {
        self.scene_version += 1;
    }
}

impl RenderParam<SoftwareScene> {
    /// Software scene and filesystem loader built from configuration
    pub fn from_config(config: &LightSyncConfig) -> Self {
        Self::new(
            SoftwareScene::from_config(&config.accel),
            Box::new(FileResourceLoader::new(&config.assets)),
        )
    }
}

impl<S: AccelerationScene + std::fmt::Debug> std::fmt::Debug for RenderParam<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderParam")
            .field("scene", &self.scene)
            .field("scene_version", &self.scene_version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_bump_version() {
        let mut param = RenderParam::from_config(&LightSyncConfig::default());
        assert_eq!(param.scene_version(), 0);

        let _ = param.acquire_scene_for_edit();
        param.invalidate();
        assert_eq!(param.scene_version(), 2);
        assert_eq!(param.scene().geometry_count(), 0);
    }
}
