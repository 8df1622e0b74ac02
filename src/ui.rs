//! Values for the HUD and game over screen
//!
//! The UI layer formats these itself; nothing here builds display strings
//! beyond the difficulty label.

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Snapshot of everything the UI shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub max_lives: u8,
    pub high_score: u32,
    pub difficulty: &'static str,
    pub slow_motion: bool,
    /// Set once the run is over
    pub final_score: Option<u32>,
}

impl Hud {
    pub fn from_state(state: &GameState, high_score: u32) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            max_lives: crate::consts::STARTING_LIVES,
            high_score,
            difficulty: state.difficulty.label(),
            slow_motion: state.slow_motion.is_active(),
            final_score: state.final_score(),
        }
    }

    /// Lives lost so far
    pub fn lives_lost(&self) -> u8 {
        self.max_lives.saturating_sub(self.lives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    #[test]
    fn test_hud_running() {
        let mut state = GameState::new(1);
        state.start(Difficulty::Medium);
        state.score = 4;
        state.lives = 2;
        let hud = Hud::from_state(&state, 10);
        assert_eq!(hud.phase, GamePhase::Running);
        assert_eq!(hud.difficulty, "Medium");
        assert_eq!(hud.lives_lost(), 1);
        assert_eq!(hud.high_score, 10);
        assert_eq!(hud.final_score, None);
    }

    #[test]
    fn test_hud_game_over_surfaces_final_score() {
        let mut state = GameState::new(1);
        state.start(Difficulty::Easy);
        state.score = 7;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        let hud = Hud::from_state(&state, 7);
        assert_eq!(hud.final_score, Some(7));
        assert_eq!(hud.lives_lost(), 3);
    }

    #[test]
    fn test_hud_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_string(&Hud::from_state(&state, 0)).unwrap();
        assert!(json.contains("\"phase\":\"WelcomeScreen\""));
        assert!(json.contains("\"difficulty\":\"Easy\""));
    }
}
