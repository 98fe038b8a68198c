//! Scene-side interfaces consumed by light synchronization
//!
//! - [`SceneDelegate`]: attribute source for prims
//! - [`DirtyBits`] / [`ChangeTracker`]: incremental change bookkeeping
//! - [`Value`]: attribute value container

pub mod delegate;
pub mod dirty;
pub mod path;
pub mod tokens;
pub mod tracker;
pub mod value;

pub use delegate::{category_of, MemoryDelegate, SceneDelegate};
pub use dirty::DirtyBits;
pub use path::PrimPath;
pub use tracker::ChangeTracker;
pub use value::Value;
