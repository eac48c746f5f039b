//! Sky Hopper - An endless vertical jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arcade physics, platforms, scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `best_score`: Persisted best score
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD text labels
//! - `assets`: Sprite manifest

pub mod assets;
pub mod best_score;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use best_score::BestScore;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the browser frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical view size
    pub const VIEW_WIDTH: f32 = 400.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Size of the platform pool
    pub const PLATFORM_POOL_SIZE: usize = 10;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Lenient integer parse: leading whitespace, optional sign, then leading
/// digits. Anything unparsable yields `None`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
