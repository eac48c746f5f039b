//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Physics and
//! storage are injected so the whole frame can run without a browser.

use super::physics::{Contact, Physics};
use super::recycle::{on_platform_overlap, recycle_platforms};
use super::state::{GameEvent, GamePhase, GameState};
use crate::platform::KeyValueStore;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Idle/demo mode - the game steers itself
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    physics: &mut impl Physics,
    store: &mut impl KeyValueStore,
) {
    // Terminal: nothing moves, the HUD redraws the final layout
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    if !state.physics_paused {
        let contacts = physics.step(&mut state.player.body, &state.platforms, dt);
        for contact in contacts {
            match contact {
                Contact::Landing { .. } => on_landing(state),
                Contact::PlatformOverlap { a, b } => on_platform_overlap(state, a, b),
            }
        }
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    apply_movement(state, &input);
    recycle_platforms(state);
    check_game_over(state);
    update_score(state, store);

    state.follow_camera();
    state.player.animate(dt);
}

/// The player came down on a platform: bounce and animate
pub fn on_landing(state: &mut GameState) {
    state.player.body.vel.y = -state.tuning.bounce_speed;
    state.player.play_jump();
}

/// Horizontal velocity from held keys, with edge wrap
pub fn apply_movement(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    if input.left && !input.right {
        player.body.vel.x = -tuning.move_speed;
        player.flip_x = true;
        if player.x() < tuning.wrap_left_edge {
            player.set_x(tuning.wrap_left_to);
        }
    }
    if input.right && !input.left {
        player.body.vel.x = tuning.move_speed;
        player.flip_x = false;
        if player.x() > tuning.wrap_right_edge {
            player.set_x(tuning.wrap_right_to);
        }
    }
    if !input.left && !input.right {
        player.body.vel.x = 0.0;
    }
}

/// Falling below the ratchet ends the run; climbing far enough moves it up
pub fn check_game_over(state: &mut GameState) {
    let body_y = state.player.body.y();

    if body_y > state.game_over_distance {
        state.physics_paused = true;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            best: state.best.value(),
        });
        log::info!(
            "Game over: score {} (best {})",
            state.score,
            state.best.value()
        );
    } else if state.game_over_distance - body_y > state.tuning.game_over_margin {
        state.game_over_distance = body_y + state.tuning.game_over_margin;
    }
}

/// Score one point per distinct landing and write through a new best
pub fn update_score(state: &mut GameState, store: &mut impl KeyValueStore) {
    let touching_down = state.player.body.touching.down;

    if touching_down && !state.on_platform {
        state.player.body.vel.y = -state.tuning.bounce_speed;
        state.on_platform = true;
        state.score += 1;
        state.events.push(GameEvent::Landed { score: state.score });
    }
    if !touching_down {
        state.on_platform = false;
    }

    if state.best.offer(state.score) {
        state.events.push(GameEvent::NewBest {
            best: state.best.value(),
        });
        if let Err(e) = state.best.save(store) {
            log::warn!("Failed to persist best score: {}", e);
        }
    }
}

/// Steer toward the nearest platform under the player's feet
fn autopilot(state: &GameState) -> TickInput {
    let feet = state.player.body.bounds.bottom();
    let x = state.player.x();

    let target = state
        .platforms
        .iter()
        .filter(|p| p.body.top() >= feet)
        .min_by(|a, b| {
            (a.body.top() - feet)
                .partial_cmp(&(b.body.top() - feet))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos.x);

    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    if let Some(target_x) = target {
        let dx = target_x - x;
        // Dead zone keeps the demo from jittering around the target
        if dx < -8.0 {
            input.left = true;
        } else if dx > 8.0 {
            input.right = true;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::BestScore;
    use crate::consts::SIM_DT;
    use crate::platform::{FailingStore, MemoryStore};
    use crate::sim::body::Body;
    use crate::sim::physics::ArcadePhysics;
    use crate::sim::state::Platform;
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Physics stand-in that reports a landing on chosen ticks and never
    /// moves anything
    struct ScriptedPhysics {
        landings: Vec<bool>,
        step: usize,
    }

    impl ScriptedPhysics {
        fn new(landings: Vec<bool>) -> Self {
            Self { landings, step: 0 }
        }
    }

    impl Physics for ScriptedPhysics {
        fn step(&mut self, player: &mut Body, _: &[Platform], _: f32) -> Vec<Contact> {
            let landed = self.landings.get(self.step).copied().unwrap_or(false);
            self.step += 1;
            player.touching.down = landed;
            if landed {
                vec![Contact::Landing { platform: 0 }]
            } else {
                Vec::new()
            }
        }
    }

    fn new_state(best: u64) -> GameState {
        GameState::new(12345, Tuning::default(), BestScore::new(best))
    }

    #[test]
    fn test_continuous_contact_scores_once() {
        let mut state = new_state(0);
        let mut store = MemoryStore::new();
        let mut physics = ScriptedPhysics::new(vec![true, true, true, false, true]);

        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        }
        assert_eq!(state.score, 1);
        assert!(state.on_platform);

        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        assert!(!state.on_platform);

        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_landing_bounces_and_animates() {
        let mut state = new_state(0);
        let mut store = MemoryStore::new();
        let mut physics = ScriptedPhysics::new(vec![true]);

        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        assert_eq!(state.player.body.vel.y, -400.0);
        assert!(state.player.jump.is_playing());
    }

    #[test]
    fn test_six_landings_beat_stored_best() {
        let mut store = MemoryStore::with_item(BestScore::STORAGE_KEY, "5");
        let mut state = GameState::new(1, Tuning::default(), BestScore::load(&store));
        assert_eq!(state.best.value(), 5);

        let pattern = [true, false].repeat(6);
        let mut physics = ScriptedPhysics::new(pattern);
        for _ in 0..12 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        }

        assert_eq!(state.score, 6);
        assert_eq!(state.best.value(), 6);
        assert_eq!(
            store.get_item(BestScore::STORAGE_KEY).unwrap().as_deref(),
            Some("6")
        );
        // Only the sixth landing was a new best
        assert_eq!(store.writes, 1);
        let new_bests: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::NewBest { .. }))
            .collect();
        assert_eq!(new_bests, vec![GameEvent::NewBest { best: 6 }]);
    }

    #[test]
    fn test_failed_write_still_raises_best() {
        let mut store = FailingStore;
        let mut state = GameState::new(1, Tuning::default(), BestScore::load(&store));
        assert_eq!(state.best.value(), 0);

        let mut physics = ScriptedPhysics::new(vec![true]);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);

        assert_eq!(state.score, 1);
        assert_eq!(state.best.value(), 1);
        assert!(state.drain_events().contains(&GameEvent::NewBest { best: 1 }));
        assert!(!state.is_over());

        // The run keeps going after the dropped write
        let mut physics = ScriptedPhysics::new(vec![false, true]);
        for _ in 0..2 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        }
        assert_eq!(state.score, 2);
        assert_eq!(state.best.value(), 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_wrap_left_same_update() {
        let mut state = new_state(0);
        state.player.set_x(10.0);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        apply_movement(&mut state, &input);
        assert_eq!(state.player.x(), 615.0);
        assert_eq!(state.player.body.vel.x, -300.0);
        assert!(state.player.flip_x);
    }

    #[test]
    fn test_wrap_right_same_update() {
        let mut state = new_state(0);
        state.player.set_x(620.0);
        state.player.flip_x = true;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        apply_movement(&mut state, &input);
        assert_eq!(state.player.x(), 25.0);
        assert_eq!(state.player.body.vel.x, 300.0);
        assert!(!state.player.flip_x);
    }

    #[test]
    fn test_no_wrap_without_key() {
        let mut state = new_state(0);
        state.player.set_x(10.0);
        state.player.body.vel.x = -300.0;
        apply_movement(&mut state, &TickInput::default());
        assert_eq!(state.player.x(), 10.0);
        assert_eq!(state.player.body.vel.x, 0.0);
    }

    #[test]
    fn test_both_keys_keep_velocity() {
        let mut state = new_state(0);
        state.player.body.vel.x = 300.0;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        apply_movement(&mut state, &input);
        assert_eq!(state.player.body.vel.x, 300.0);
    }

    #[test]
    fn test_threshold_ratchets_then_game_over() {
        let mut state = new_state(0);
        let size = state.player.body.bounds.size;

        // Body top at -1000: 1000 above the initial threshold of 0
        state.player.body.bounds.min.y = -1000.0;
        check_game_over(&mut state);
        assert_eq!(state.game_over_distance, -300.0);
        assert_eq!(state.phase, GamePhase::Playing);

        // Dropping back a little is still fine
        state.player.body.bounds.min.y = -400.0;
        check_game_over(&mut state);
        assert_eq!(state.game_over_distance, -300.0);
        assert_eq!(state.phase, GamePhase::Playing);

        // Past the ratchet
        state.player.body.bounds.min.y = -299.0;
        check_game_over(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.physics_paused);
        assert_eq!(state.player.body.bounds.size, size);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { score: 0, best: 0 }]
        );
    }

    #[test]
    fn test_ratchet_never_moves_down() {
        let mut state = new_state(0);
        state.player.body.bounds.min.y = -2000.0;
        check_game_over(&mut state);
        let high = state.game_over_distance;
        state.player.body.bounds.min.y = -1500.0;
        check_game_over(&mut state);
        assert_eq!(state.game_over_distance, high);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = new_state(3);
        let mut store = MemoryStore::new();
        let mut physics = ArcadePhysics::new(300.0);

        state.player.body.set_center(Vec2::new(200.0, 500.0));
        tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
        assert!(state.is_over());

        let score = state.score;
        let best = state.best.value();
        let pos = state.player.body.center();
        let mut landings = ScriptedPhysics::new(vec![true; 10]);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut landings, &mut store);
        }
        assert_eq!(state.score, score);
        assert_eq!(state.best.value(), best);
        assert_eq!(state.player.body.center(), pos);
    }

    #[test]
    fn test_full_physics_first_landing_scores() {
        let mut state = new_state(0);
        let mut store = MemoryStore::new();
        let mut physics = ArcadePhysics::new(state.tuning.gravity);

        // Put a platform right under the player and drop onto it
        state.platforms[0].pos = Vec2::new(325.0, 0.0);
        state.platforms[0].refresh_body();
        state.player.body.set_center(Vec2::new(325.0, -60.0));
        state.player.body.vel = Vec2::ZERO;

        let mut landed_at = None;
        for i in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut physics, &mut store);
            if state.score > 0 {
                landed_at = Some(i);
                break;
            }
        }
        assert!(landed_at.is_some());
        assert_eq!(state.score, 1);
        assert_eq!(state.best.value(), 1);
        assert!(state.player.body.vel.y < 0.0);
        assert!(!state.is_over());
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = new_state(0);
            let mut store = MemoryStore::new();
            let mut physics = ArcadePhysics::new(300.0);
            let input = TickInput {
                idle_mode: true,
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut state, &input, SIM_DT, &mut physics, &mut store);
            }
            state
        };
        let a = run();
        let b = run();
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.body.center(), b.player.body.center());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.pos, pb.pos);
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pool_size_is_invariant(
                seed in any::<u64>(),
                keys in proptest::collection::vec(0u8..4, 1..400),
            ) {
                let mut state = GameState::new(seed, Tuning::default(), BestScore::default());
                let mut store = MemoryStore::new();
                let mut physics = ArcadePhysics::new(300.0);
                for k in keys {
                    let input = TickInput {
                        left: k & 1 != 0,
                        right: k & 2 != 0,
                        idle_mode: false,
                    };
                    tick(&mut state, &input, SIM_DT, &mut physics, &mut store);
                    prop_assert_eq!(state.platforms.len(), 10);
                }
            }

            #[test]
            fn recycling_never_changes_pool_size(
                seed in any::<u64>(),
                heights in proptest::collection::vec(-20_000.0f32..500.0, 1..50),
            ) {
                let mut state = GameState::new(seed, Tuning::default(), BestScore::default());
                for y in heights {
                    state.player.body.set_center(Vec2::new(200.0, y));
                    crate::sim::recycle_platforms(&mut state);
                    prop_assert_eq!(state.platforms.len(), 10);
                    for p in &state.platforms {
                        prop_assert_eq!(p.body.center(), p.pos);
                    }
                }
            }

            #[test]
            fn best_score_never_decreases_across_sessions(
                seeds in proptest::collection::vec(any::<u64>(), 1..4),
            ) {
                let mut store = MemoryStore::new();
                let mut last_best = 0;
                for seed in seeds {
                    let best = BestScore::load(&store);
                    prop_assert!(best.value() >= last_best);
                    let mut state = GameState::new(seed, Tuning::default(), best);
                    let mut physics = ArcadePhysics::new(300.0);
                    let input = TickInput { idle_mode: true, ..Default::default() };
                    for _ in 0..300 {
                        tick(&mut state, &input, SIM_DT, &mut physics, &mut store);
                    }
                    prop_assert!(state.best.value() >= best.value());
                    last_best = BestScore::load(&store).value();
                    prop_assert_eq!(last_best, state.best.value().max(best.value()));
                }
            }

            #[test]
            fn wrap_left_edge(x in -100.0f32..14.5) {
                let mut state = GameState::new(1, Tuning::default(), BestScore::default());
                state.player.set_x(x);
                let input = TickInput { left: true, ..Default::default() };
                apply_movement(&mut state, &input);
                prop_assert_eq!(state.player.x(), 615.0);
            }

            #[test]
            fn wrap_right_edge(x in 616.0f32..800.0) {
                let mut state = GameState::new(1, Tuning::default(), BestScore::default());
                state.player.set_x(x);
                let input = TickInput { right: true, ..Default::default() };
                apply_movement(&mut state, &input);
                prop_assert_eq!(state.player.x(), 25.0);
            }
        }
    }
}
