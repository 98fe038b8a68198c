//! # Core Module
//!
//! Shared configuration types used by the render param, the resource
//! loader and the inspector tool.

pub mod config;

pub use config::{
    LightSyncConfig,
    AssetConfig,
    AccelConfig,
    Config,
    ConfigError,
};
