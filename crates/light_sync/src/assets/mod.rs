//! Light asset loading
//!
//! Lights reference two kinds of files: textures (rect and dome lights)
//! and IES photometric profiles. Both are read synchronously through the
//! [`ResourceLoader`] seam so hosts can substitute their own image and
//! asset resolution pipelines.

pub mod ies;
pub mod image_loader;

pub use ies::{IesError, IesProfile, PhotometricType};
pub use image_loader::ImageData;

use crate::core::AssetConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The path could not be resolved against any search path
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    /// The feature is switched off in configuration
    #[error("Loading {0} is disabled")]
    Disabled(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding failed
    #[error("Image decode failed: {0}")]
    Decode(String),

    /// IES parsing failed
    #[error("IES parse failed: {0}")]
    Ies(#[from] IesError),
}

/// Synchronous loader for light textures and IES profiles
pub trait ResourceLoader {
    /// Decode a texture file into RGB pixels
    fn load_texture(&self, path: &Path) -> Result<ImageData, ResourceError>;

    /// Read and parse an IES profile
    fn load_ies(&self, path: &Path) -> Result<IesProfile, ResourceError>;
}

/// Filesystem loader resolving relative paths against configured search
/// paths
#[derive(Debug, Clone, Default)]
pub struct FileResourceLoader {
    config: AssetConfig,
}

impl FileResourceLoader {
    /// Create a loader from asset configuration
    pub fn new(config: &AssetConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Resolve an authored path to an existing file
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, ResourceError> {
        if path.is_absolute() {
            return if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(ResourceError::NotFound(path.to_path_buf()))
            };
        }

        self.config
            .search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ResourceError::NotFound(path.to_path_buf()))
    }
}

impl ResourceLoader for FileResourceLoader {
    fn load_texture(&self, path: &Path) -> Result<ImageData, ResourceError> {
        if !self.config.enable_textures {
            return Err(ResourceError::Disabled("light textures"));
        }
        let resolved = self.resolve(path)?;
        ImageData::from_file(resolved)
    }

    fn load_ies(&self, path: &Path) -> Result<IesProfile, ResourceError> {
        if !self.config.enable_ies {
            return Err(ResourceError::Disabled("IES profiles"));
        }
        let resolved = self.resolve(path)?;
        log::debug!("Loading IES profile from: {:?}", resolved);
        let text = std::fs::read_to_string(&resolved)?;
        Ok(IesProfile::parse(&text)?)
    }
}
