//! # Light Sync
//!
//! Light prim synchronization for ray-tracing render delegates.
//!
//! ## Features
//!
//! - **Incremental Sync**: only dirty attribute categories are re-read
//! - **Transactional Updates**: a failed sync leaves the last good record
//! - **Acceleration Geometry**: rect, disk, sphere and cylinder lights are
//!   mirrored into the ray tracer's scene
//! - **Light Assets**: PNG/HDR textures and IES photometric profiles
//!
//! ## Quick Start
//!
//! ```rust
//! use light_sync::prelude::*;
//!
//! let config = LightSyncConfig::default();
//! let mut render_param = RenderParam::from_config(&config);
//!
//! let path = PrimPath::from("/Lights/Key");
//! let mut delegate = MemoryDelegate::new();
//! delegate.insert_prim(path.clone(), tokens::RECT_LIGHT);
//! delegate.set(&path, tokens::WIDTH, 2.0_f32);
//!
//! let mut lights = LightSet::new();
//! lights.insert(path.clone(), tokens::RECT_LIGHT, &mut render_param);
//! lights.sync(&delegate, &mut render_param);
//!
//! let light = lights.get(&path).unwrap();
//! assert!(light.data().geometry_id.is_valid());
//!
//! lights.finalize_all(&mut render_param);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

// Shared configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod scene;
pub mod accel;
pub mod assets;
pub mod light;
pub mod render;

#[cfg(test)]
mod tests;

/// Common imports for light sync users
pub mod prelude {
    pub use crate::{
        accel::{AccelerationScene, GeometryHandle, GeometryId, LightGeometry, SoftwareScene},
        assets::{FileResourceLoader, ResourceLoader},
        core::{Config, LightSyncConfig},
        light::{Light, LightData, LightKind, ShapeVariant, SyncState},
        render::{LightSet, RenderParam},
        scene::{tokens, ChangeTracker, DirtyBits, MemoryDelegate, PrimPath, SceneDelegate, Value},
    };
}
