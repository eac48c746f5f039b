//! Platform recycling
//!
//! The pool never grows or shrinks. Platforms left far below the player are
//! moved above the topmost one, which turns ten sprites into an endless
//! field.

use super::state::{GameEvent, GameState, random_in};
use crate::distance;

/// Move every platform that is below the player and farther than the
/// recycle distance to a fresh spot above the topmost platform.
///
/// All platforms recycled in one call share the same new y. Returns the
/// number of platforms moved.
pub fn recycle_platforms(state: &mut GameState) -> usize {
    let min_y = state.min_platform_y();
    let new_y = min_y - state.tuning.recycle_gap;
    let player_y = state.player.y();
    let player_center = state.player.body.center();
    let max_distance = state.tuning.recycle_distance;
    let x_range = state.tuning.recycle_x;

    let mut moved = 0;
    for (index, platform) in state.platforms.iter_mut().enumerate() {
        if platform.pos.y > player_y
            && distance(player_center, platform.body.center()) > max_distance
        {
            platform.pos.x = random_in(&mut state.rng, x_range);
            platform.pos.y = new_y;
            platform.refresh_body();
            state.events.push(GameEvent::PlatformRecycled { index });
            log::debug!("Recycled platform {} to ({}, {})", index, platform.pos.x, new_y);
            moved += 1;
        }
    }
    moved
}

/// Two platforms overlap: re-roll the first one's x
pub fn on_platform_overlap(state: &mut GameState, a: usize, _b: usize) {
    let x_range = state.tuning.recycle_x;
    if let Some(platform) = state.platforms.get_mut(a) {
        platform.pos.x = random_in(&mut state.rng, x_range);
        platform.refresh_body();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::BestScore;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(2024, Tuning::default(), BestScore::default())
    }

    #[test]
    fn test_nothing_recycled_near_player() {
        let mut state = new_state();
        let before: Vec<_> = state.platforms.iter().map(|p| p.pos).collect();
        assert_eq!(recycle_platforms(&mut state), 0);
        let after: Vec<_> = state.platforms.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_far_below_platform_moves_above_top() {
        let mut state = new_state();
        // Climb well above the field: everything below and far away
        state.player.body.set_center(Vec2::new(200.0, -2000.0));

        let moved = recycle_platforms(&mut state);
        assert!(moved > 0);
        assert_eq!(state.platforms.len(), 10);

        let recycled: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::PlatformRecycled { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(recycled.len(), moved);
        for index in recycled {
            let p = &state.platforms[index];
            assert_eq!(p.pos.y, -900.0 - 200.0);
            assert!((0.0..=640.0).contains(&p.pos.x));
            assert_eq!(p.body.center(), p.pos);
        }
    }

    #[test]
    fn test_platforms_above_player_never_recycled() {
        let mut state = new_state();
        // Far below everything: platforms are far but above
        state.player.body.set_center(Vec2::new(200.0, 5000.0));
        assert_eq!(recycle_platforms(&mut state), 0);
    }

    #[test]
    fn test_overlap_rerolls_first_platform() {
        let mut state = new_state();
        state.platforms[0].pos = Vec2::new(-500.0, 0.0);
        state.platforms[0].refresh_body();
        on_platform_overlap(&mut state, 0, 1);
        let p = &state.platforms[0];
        assert!((0.0..=640.0).contains(&p.pos.x));
        assert_eq!(p.pos.y, 0.0);
        assert_eq!(p.body.center(), p.pos);
    }
}
