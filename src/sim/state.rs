//! Game state and core simulation types
//!
//! Everything a session mutates lives on `GameState`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body};
use crate::assets::SpriteKey;
use crate::best_score::BestScore;
use crate::consts::{PLATFORM_POOL_SIZE, VIEW_HEIGHT};
use crate::tuning::{SpawnRange, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; terminal for the session
    GameOver,
}

/// Things that happened during a tick, drained by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A distinct landing scored a point
    Landed { score: u64 },
    /// The best score was raised (and written through)
    NewBest { best: u64 },
    /// A platform was moved to the top of the field
    PlatformRecycled { index: usize },
    /// The player fell past the threshold
    GameOver { score: u64, best: u64 },
}

/// Frames of the jump animation
pub const JUMP_FRAMES: [SpriteKey; 2] = [SpriteKey::DoodlerRight, SpriteKey::DoodlerJump];
/// Jump animation frame rate
pub const JUMP_FRAME_RATE: f32 = 20.0;

/// One-shot jump animation; the sprite keeps the last frame when done
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpAnimation {
    elapsed: f32,
    playing: bool,
}

impl JumpAnimation {
    /// Restart from the first frame
    pub fn play(&mut self) {
        self.elapsed = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance and return the frame to show, if the animation drives it
    pub fn advance(&mut self, dt: f32) -> Option<SpriteKey> {
        if !self.playing {
            return None;
        }
        let frame = (self.elapsed * JUMP_FRAME_RATE) as usize;
        self.elapsed += dt;
        if frame >= JUMP_FRAMES.len() - 1 {
            self.playing = false;
            return Some(JUMP_FRAMES[JUMP_FRAMES.len() - 1]);
        }
        Some(JUMP_FRAMES[frame])
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Mirrored horizontally (facing left)
    pub flip_x: bool,
    /// Texture currently shown
    pub texture: SpriteKey,
    pub jump: JumpAnimation,
}

impl Player {
    pub fn new(start: Vec2, body_size: Vec2, launch_speed: f32) -> Self {
        let mut body = Body::from_center(start, body_size);
        body.vel.y = -launch_speed;
        Self {
            body,
            flip_x: false,
            texture: SpriteKey::DoodlerLeft,
            jump: JumpAnimation::default(),
        }
    }

    /// Sprite x (body center)
    #[inline]
    pub fn x(&self) -> f32 {
        self.body.center().x
    }

    /// Sprite y (body center)
    #[inline]
    pub fn y(&self) -> f32 {
        self.body.center().y
    }

    pub fn set_x(&mut self, x: f32) {
        self.body.set_center_x(x);
    }

    /// Start the jump animation
    pub fn play_jump(&mut self) {
        self.jump.play();
        self.texture = JUMP_FRAMES[0];
    }

    /// Advance animation state
    pub fn animate(&mut self, dt: f32) {
        if let Some(frame) = self.jump.advance(dt) {
            self.texture = frame;
        }
    }
}

/// A platform: sprite position plus a static body that only follows the
/// sprite when refreshed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Sprite center
    pub pos: Vec2,
    /// Static collision body
    pub body: Aabb,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            body: Aabb::from_center(pos, size),
        }
    }

    /// Re-sync the static body with the sprite position
    pub fn refresh_body(&mut self) {
        self.body = Aabb::from_center(self.pos, self.body.size);
    }
}

/// Draw an integer in an inclusive range
pub fn random_in(rng: &mut Pcg32, range: SpawnRange) -> f32 {
    rng.random_range(range.min..=range.max) as f32
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Balance values for this session
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Physics simulation halted (set on game over)
    pub physics_paused: bool,
    pub player: Player,
    /// Fixed-size pool, recycled in place
    pub platforms: Vec<Platform>,
    /// Current run score
    pub score: u64,
    pub best: BestScore,
    /// Landing guard: set while the player is on a platform
    pub on_platform: bool,
    /// Ratchet: falling below this y ends the run
    pub game_over_distance: f32,
    /// Vertical camera scroll (top of the view in world y)
    pub camera_y: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Set up a fresh session
    pub fn new(seed: u64, tuning: Tuning, best: BestScore) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let (sx, sy) = tuning.player_start;
        let (bw, bh) = tuning.player_body;
        let player = Player::new(Vec2::new(sx, sy), Vec2::new(bw, bh), tuning.launch_speed);

        let (pw, ph) = tuning.platform_size;
        let platforms = (0..PLATFORM_POOL_SIZE)
            .map(|i| {
                let x = random_in(&mut rng, tuning.spawn_x);
                let y = -tuning.platform_spacing * i as f32;
                Platform::new(Vec2::new(x, y), Vec2::new(pw, ph))
            })
            .collect();

        let mut state = Self {
            seed,
            rng,
            tuning,
            phase: GamePhase::Playing,
            physics_paused: false,
            player,
            platforms,
            score: 0,
            best,
            on_platform: false,
            game_over_distance: 0.0,
            camera_y: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.follow_camera();
        state
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Vertical follow: player centered, no horizontal scroll
    pub fn follow_camera(&mut self) {
        self.camera_y = self.player.y() - VIEW_HEIGHT / 2.0;
    }

    /// Topmost platform y, never below 0
    pub fn min_platform_y(&self) -> f32 {
        self.platforms.iter().map(|p| p.pos.y).fold(0.0, f32::min)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
