//! In-process acceleration scene holding analytic light primitives
//!
//! Geometry objects live in a slot map; handles are the packed slot map
//! keys, so a released handle can never alias a newer primitive. Ids come
//! from a free list and are reused after detachment, the way hardware ray
//! tracing libraries recycle geometry ids.

use super::{AccelError, AccelResult, AccelerationScene, GeometryHandle, GeometryId, LightGeometry};
use crate::core::AccelConfig;
use crate::foundation::collections::{key_from_raw, key_to_raw, new_key_type, FreeList, SlotMap};

new_key_type! {
    struct GeometryKey;
}

#[derive(Debug, Clone)]
struct GeometryEntry {
    id: GeometryId,
    geometry: LightGeometry,
}

/// Counters of scene mutations, useful to verify incremental updates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Successful attachments
    pub attaches: u64,
    /// Successful in-place updates
    pub updates: u64,
    /// Detachments of live geometry
    pub detaches: u64,
}

/// Capacity-limited software acceleration scene
#[derive(Debug, Clone)]
pub struct SoftwareScene {
    geometries: SlotMap<GeometryKey, GeometryEntry>,
    ids: FreeList<GeometryKey>,
    capacity: usize,
    stats: SceneStats,
}

impl SoftwareScene {
    /// Create a scene that holds at most `capacity` primitives
    pub fn new(capacity: usize) -> Self {
        Self {
            geometries: SlotMap::with_key(),
            ids: FreeList::new(),
            capacity,
            stats: SceneStats::default(),
        }
    }

    /// Create a scene from configuration
    pub fn from_config(config: &AccelConfig) -> Self {
        Self::new(config.max_geometries)
    }

    /// Number of attached primitives
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    /// Primitive attached under `id`
    pub fn geometry(&self, id: GeometryId) -> Option<&LightGeometry> {
        let key = *self.ids.get(id.0 as usize)?;
        self.geometries.get(key).map(|entry| &entry.geometry)
    }

    /// Mutation counters
    pub fn stats(&self) -> SceneStats {
        self.stats
    }
}

impl Default for SoftwareScene {
    fn default() -> Self {
        Self::from_config(&AccelConfig::default())
    }
}

impl AccelerationScene for SoftwareScene {
    fn attach_geometry(&mut self, geometry: &LightGeometry) -> AccelResult<(GeometryId, GeometryHandle)> {
        if self.geometries.len() >= self.capacity {
            return Err(AccelError::ResourceExhausted { capacity: self.capacity });
        }

        let key = self.geometries.insert(GeometryEntry {
            id: GeometryId::INVALID,
            geometry: geometry.clone(),
        });
        let index = self.ids.insert(key);
        let id = match u32::try_from(index) {
            Ok(raw) if raw != GeometryId::INVALID.0 => GeometryId(raw),
            _ => {
                self.ids.remove(index);
                self.geometries.remove(key);
                return Err(AccelError::ResourceExhausted { capacity: self.capacity });
            }
        };
        if let Some(entry) = self.geometries.get_mut(key) {
            entry.id = id;
        }

        self.stats.attaches += 1;
        log::trace!("Attached {:?} geometry as {:?}", geometry.kind(), id);
        Ok((id, GeometryHandle(key_to_raw(key))))
    }

    fn update_geometry(&mut self, handle: GeometryHandle, geometry: &LightGeometry) -> AccelResult<()> {
        let key: GeometryKey = key_from_raw(handle.0);
        let entry = self.geometries.get_mut(key).ok_or(AccelError::StaleHandle(handle))?;

        if entry.geometry.kind() != geometry.kind() {
            return Err(AccelError::KindMismatch {
                existing: entry.geometry.kind(),
                requested: geometry.kind(),
            });
        }

        entry.geometry = geometry.clone();
        self.stats.updates += 1;
        Ok(())
    }

    fn detach_geometry(&mut self, id: GeometryId, handle: GeometryHandle) {
        let key: GeometryKey = key_from_raw(handle.0);
        match self.geometries.get(key) {
            Some(entry) if entry.id == id => {
                self.geometries.remove(key);
                self.ids.remove(id.0 as usize);
                self.stats.detaches += 1;
                log::trace!("Detached geometry {:?}", id);
            }
            _ => log::warn!("Ignoring detach of unknown geometry {:?}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;

    fn sphere(radius: f32) -> LightGeometry {
        LightGeometry::Sphere { center: Point3::origin(), radius }
    }

    #[test]
    fn test_attach_update_detach() {
        let mut scene = SoftwareScene::new(4);
        let (id, handle) = scene.attach_geometry(&sphere(1.0)).unwrap();
        assert!(id.is_valid());
        assert_eq!(scene.geometry_count(), 1);

        scene.update_geometry(handle, &sphere(2.0)).unwrap();
        assert_eq!(scene.geometry(id), Some(&sphere(2.0)));

        scene.detach_geometry(id, handle);
        assert_eq!(scene.geometry_count(), 0);
        assert!(scene.geometry(id).is_none());
        assert_eq!(scene.stats(), SceneStats { attaches: 1, updates: 1, detaches: 1 });
    }

    #[test]
    fn test_capacity_exhaustion() {
        let mut scene = SoftwareScene::new(1);
        scene.attach_geometry(&sphere(1.0)).unwrap();
        assert_eq!(
            scene.attach_geometry(&sphere(1.0)),
            Err(AccelError::ResourceExhausted { capacity: 1 })
        );
    }

    #[test]
    fn test_stale_handle_and_kind_mismatch() {
        let mut scene = SoftwareScene::new(4);
        let (id, handle) = scene.attach_geometry(&sphere(1.0)).unwrap();

        let disk = LightGeometry::Disk {
            center: Point3::origin(),
            normal: crate::foundation::math::Vec3::z(),
            radius: 1.0,
        };
        assert!(matches!(
            scene.update_geometry(handle, &disk),
            Err(AccelError::KindMismatch { .. })
        ));

        scene.detach_geometry(id, handle);
        assert_eq!(scene.update_geometry(handle, &sphere(1.0)), Err(AccelError::StaleHandle(handle)));

        // Second detach is ignored
        scene.detach_geometry(id, handle);
        assert_eq!(scene.stats().detaches, 1);
    }

    #[test]
    fn test_ids_are_reused_but_handles_are_not() {
        let mut scene = SoftwareScene::new(4);
        let (id_a, handle_a) = scene.attach_geometry(&sphere(1.0)).unwrap();
        scene.detach_geometry(id_a, handle_a);

        let (id_b, handle_b) = scene.attach_geometry(&sphere(2.0)).unwrap();
        assert_eq!(id_a, id_b);
        assert_ne!(handle_a, handle_b);

        // The old handle must not detach the new geometry
        scene.detach_geometry(id_a, handle_a);
        assert_eq!(scene.geometry_count(), 1);
    }
}
