//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool index)
//! - No rendering or platform dependencies beyond injected storage

pub mod body;
pub mod physics;
pub mod recycle;
pub mod state;
pub mod tick;

pub use body::{Aabb, Body, Touching};
pub use physics::{ArcadePhysics, Contact, Physics};
pub use recycle::{on_platform_overlap, recycle_platforms};
pub use state::{GameEvent, GamePhase, GameState, JumpAnimation, Platform, Player};
pub use tick::{TickInput, tick};
