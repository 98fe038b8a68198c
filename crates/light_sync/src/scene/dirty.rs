//! Dirty-bit categories for incremental light updates

use bitflags::bitflags;

bitflags! {
    /// Change categories tracked per light prim
    ///
    /// A sync call consumes the bits in [`DirtyBits::ALL_DIRTY`] and leaves
    /// any other (renderer-specific) bits in place for their owners.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirtyBits: u32 {
        /// Light-to-world transform changed
        const DIRTY_TRANSFORM = 1 << 0;
        /// Shape, color, intensity or shaping parameters changed
        const DIRTY_PARAMS = 1 << 1;
        /// Shadow parameters changed
        const DIRTY_SHADOW_PARAMS = 1 << 2;
        /// Light linking collections changed
        const DIRTY_COLLECTION = 1 << 3;
        /// Referenced files (textures, IES profiles) must be reloaded
        const DIRTY_RESOURCE = 1 << 4;
        /// Visibility flags changed
        const DIRTY_VISIBILITY = 1 << 5;

        /// Every light category
        const ALL_DIRTY = Self::DIRTY_TRANSFORM.bits()
            | Self::DIRTY_PARAMS.bits()
            | Self::DIRTY_SHADOW_PARAMS.bits()
            | Self::DIRTY_COLLECTION.bits()
            | Self::DIRTY_RESOURCE.bits()
            | Self::DIRTY_VISIBILITY.bits();
    }
}

impl DirtyBits {
    /// No change
    pub const CLEAN: Self = Self::empty();

    /// Whether any light category is set
    pub fn is_light_dirty(self) -> bool {
        self.intersects(Self::ALL_DIRTY)
    }

    /// Categories that can move or reshape a light's geometry
    pub fn affects_geometry(self) -> bool {
        self.intersects(Self::DIRTY_TRANSFORM | Self::DIRTY_PARAMS | Self::DIRTY_VISIBILITY)
    }
}
