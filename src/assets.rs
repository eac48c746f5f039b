//! Sprite manifest
//!
//! The five images the game loads at startup. Paths are relative to the
//! page; a missing file is the browser's problem, not ours.

use serde::{Deserialize, Serialize};

/// Every sprite texture the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    Background,
    DoodlerLeft,
    DoodlerRight,
    Platform,
    DoodlerJump,
}

impl SpriteKey {
    /// Load order
    pub const ALL: [SpriteKey; 5] = [
        SpriteKey::Background,
        SpriteKey::DoodlerLeft,
        SpriteKey::DoodlerRight,
        SpriteKey::Platform,
        SpriteKey::DoodlerJump,
    ];

    /// Texture key as registered with the loader
    pub fn key(&self) -> &'static str {
        match self {
            SpriteKey::Background => "bg",
            SpriteKey::DoodlerLeft => "doodlerLeft",
            SpriteKey::DoodlerRight => "doodlerRight",
            SpriteKey::Platform => "platform",
            SpriteKey::DoodlerJump => "doodlerJump",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            SpriteKey::Background => "assets/doodlerBg.png",
            SpriteKey::DoodlerLeft => "assets/doodlerLeft.png",
            SpriteKey::DoodlerRight => "assets/doodlerRight.png",
            SpriteKey::Platform => "assets/platform.png",
            SpriteKey::DoodlerJump => "assets/doodlerJump.png",
        }
    }

    /// Frame size in pixels
    pub fn size(&self) -> (f32, f32) {
        match self {
            SpriteKey::Background => (400.0, 600.0),
            SpriteKey::DoodlerLeft | SpriteKey::DoodlerRight | SpriteKey::DoodlerJump => {
                (128.0, 120.0)
            }
            SpriteKey::Platform => (64.0, 16.0),
        }
    }
}
