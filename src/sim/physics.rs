//! Arcade physics step
//!
//! Gravity, velocity integration and one-way platform contacts. The step
//! never reacts to contacts beyond separating bodies: it reports them and
//! lets the game decide what a landing means.

use glam::Vec2;

use super::body::{Body, Touching, lands_on_top};
use super::state::Platform;

/// Something the physics step observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// The player came down on top of a platform
    Landing { platform: usize },
    /// Two platform bodies overlap
    PlatformOverlap { a: usize, b: usize },
}

/// A physics backend the simulation can step
pub trait Physics {
    /// Advance the player by `dt` against a fixed set of static platforms
    fn step(&mut self, player: &mut Body, platforms: &[Platform], dt: f32) -> Vec<Contact>;
}

/// Default backend: constant gravity, fully elastic vertical bounce
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    pub gravity: Vec2,
    /// Vertical restitution on landing (1.0 = full bounce)
    pub bounce_y: f32,
}

impl ArcadePhysics {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity: Vec2::new(0.0, gravity),
            bounce_y: 1.0,
        }
    }
}

impl Physics for ArcadePhysics {
    fn step(&mut self, player: &mut Body, platforms: &[Platform], dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();

        player.touching = Touching::default();
        player.vel += self.gravity * dt;

        let prev_bottom = player.bounds.bottom();
        player.bounds.min += player.vel * dt;

        // Land on the highest platform crossed this step
        let moved: &Body = player;
        let landed = platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| lands_on_top(prev_bottom, moved, &p.body))
            .min_by(|(_, a), (_, b)| {
                a.body
                    .top()
                    .partial_cmp(&b.body.top())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, p)| (i, p.body.top()));

        if let Some((index, top)) = landed {
            player.bounds.min.y = top - player.bounds.size.y;
            player.vel.y = -player.vel.y * self.bounce_y;
            player.touching.down = true;
            contacts.push(Contact::Landing { platform: index });
        }

        for a in 0..platforms.len() {
            for b in (a + 1)..platforms.len() {
                if platforms[a].body.intersects(&platforms[b].body) {
                    contacts.push(Contact::PlatformOverlap { a, b });
                }
            }
        }

        contacts
    }
}
