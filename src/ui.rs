//! HUD text labels
//!
//! Three fixed-style labels pinned to the screen (they ignore the camera).
//! While playing the score and best score sit in the top-left corner; once
//! the run ends all three are laid out around the screen center every frame.

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::GameState;

/// A screen-space text label
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// 0.0 = left/top aligned, 0.5 = centered
    pub origin: f32,
    pub font_px: u32,
    /// CSS color
    pub color: &'static str,
    pub visible: bool,
}

impl Label {
    fn new(text: &str, x: f32, y: f32, font_px: u32, color: &'static str) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            origin: 0.0,
            font_px,
            color,
            visible: true,
        }
    }
}

pub const GAME_OVER_TEXT: &str = "Game Over";

/// The game's HUD
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: Label,
    pub best: Label,
    pub banner: Label,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        let mut banner = Label::new(
            GAME_OVER_TEXT,
            VIEW_WIDTH / 2.0,
            VIEW_HEIGHT / 2.0,
            48,
            "#FF0000",
        );
        banner.origin = 0.5;
        banner.visible = false;

        Self {
            score: Label::new("Score: 0", 16.0, 16.0, 32, "#000"),
            best: Label::new("Best Score: 0", 16.0, 48.0, 24, "#000"),
            banner,
        }
    }

    /// Bring the labels in line with the game state
    pub fn sync(&mut self, state: &GameState) {
        self.score.text = format!("Score: {}", state.score);
        self.best.text = format!("Best Score: {}", state.best.value());

        if state.is_over() {
            self.layout_game_over();
        }
    }

    /// Centered end-of-run layout
    fn layout_game_over(&mut self) {
        let cx = VIEW_WIDTH / 2.0;
        let cy = VIEW_HEIGHT / 2.0;

        self.banner.text = GAME_OVER_TEXT.to_string();
        self.banner.x = cx;
        self.banner.y = cy;
        self.banner.visible = true;

        let score_y = cy + 80.0;
        self.score.x = cx;
        self.score.y = score_y;
        self.best.x = cx;
        self.best.y = score_y + 40.0;
    }

    pub fn labels(&self) -> [&Label; 3] {
        [&self.score, &self.best, &self.banner]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::BestScore;
    use crate::tuning::Tuning;

    #[test]
    fn test_initial_labels() {
        let hud = Hud::new();
        assert_eq!(hud.score.text, "Score: 0");
        assert_eq!((hud.score.x, hud.score.y), (16.0, 16.0));
        assert_eq!(hud.best.font_px, 24);
        assert!(!hud.banner.visible);
    }

    #[test]
    fn test_sync_while_playing() {
        let mut state = GameState::new(1, Tuning::default(), BestScore::new(9));
        state.score = 4;
        let mut hud = Hud::new();
        hud.sync(&state);
        assert_eq!(hud.score.text, "Score: 4");
        assert_eq!(hud.best.text, "Best Score: 9");
        assert!(!hud.banner.visible);
        assert_eq!(hud.best.y, 48.0);
    }

    #[test]
    fn test_game_over_layout() {
        let mut state = GameState::new(1, Tuning::default(), BestScore::new(9));
        state.score = 4;
        state.phase = crate::sim::GamePhase::GameOver;

        let mut hud = Hud::new();
        hud.sync(&state);
        assert!(hud.banner.visible);
        assert_eq!(hud.banner.text, "Game Over");
        assert_eq!((hud.banner.x, hud.banner.y), (200.0, 300.0));
        assert_eq!((hud.score.x, hud.score.y), (200.0, 380.0));
        assert_eq!((hud.best.x, hud.best.y), (200.0, 420.0));

        // Redrawing every frame changes nothing
        let before = hud.clone();
        hud.sync(&state);
        assert_eq!(hud, before);
    }
}
