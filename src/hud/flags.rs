//! HUD visibility flags.
//!
//! A flag only says whether an item may be drawn; the rest of the frame
//! state (an empty inventory list, full breath) can still suppress it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HudFlags(pub u32);

impl HudFlags {
    pub const NONE: Self = Self(0);
    pub const HOTBAR: Self = Self(1 << 0);
    pub const HEALTHBAR: Self = Self(1 << 1);
    pub const CROSSHAIR: Self = Self(1 << 2);
    /// Wielded item in the player's hand, drawn by the scene renderer
    pub const WIELDITEM: Self = Self(1 << 3);
    pub const BREATHBAR: Self = Self(1 << 4);
    /// Minimap overlay, drawn by the minimap renderer
    pub const MINIMAP: Self = Self(1 << 5);

    pub const ALL: Self = Self(
        Self::HOTBAR.0
            | Self::HEALTHBAR.0
            | Self::CROSSHAIR.0
            | Self::WIELDITEM.0
            | Self::BREATHBAR.0
            | Self::MINIMAP.0,
    );

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Sets the bits in `mask` to their values in `flags`, leaving others
    #[inline]
    pub fn with_masked(self, flags: Self, mask: Self) -> Self {
        Self((self.0 & !mask.0) | (flags.0 & mask.0))
    }
}

impl Default for HudFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for HudFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
