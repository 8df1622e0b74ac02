//! Frame driver
//!
//! Owns the simulation state, the pending input written by event handlers,
//! and the high score. Each displayed frame feeds its elapsed time into a
//! fixed-timestep accumulator and runs as many ticks as fit.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{Difficulty, GameEvent, GamePhase, GameState, RestartKind, TickInput, tick};
use crate::ui::Hud;

/// Direction keys the input layer reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    high_score: HighScore,
    input: TickInput,
    accumulator: f32,
    events: Vec<GameEvent>,
    /// Settings edited since the last save
    settings_changed: bool,
}

impl Game {
    pub fn new(settings: Settings, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        Self {
            state: GameState::with_params(seed, settings.sim_params()),
            settings,
            high_score: HighScore::load(store),
            input: TickInput::default(),
            accumulator: 0.0,
            events: Vec::new(),
            settings_changed: false,
        }
    }

    /// Run simulation ticks for `dt` seconds of wall time
    ///
    /// Returns the number of ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one tick at the fixed timestep
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input, SIM_DT);
        // Clear one-shot inputs after processing
        self.input.clear_commands();

        if self.high_score.observe(self.state.score) {
            log::debug!("New high score {}", self.state.score);
        }
        self.events.extend(self.state.drain_events());
    }

    pub fn press(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.input.keys.left = true,
            Direction::Right => self.input.keys.right = true,
        }
    }

    pub fn release(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.input.keys.left = false,
            Direction::Right => self.input.keys.right = false,
        }
    }

    /// Release every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.input.keys = Default::default();
    }

    pub fn request_color_change(&mut self) {
        self.input.change_color = true;
    }

    /// Toggle pause; two requests before the next tick cancel out
    pub fn toggle_pause(&mut self) {
        self.input.pause = !self.input.pause;
    }

    /// Pause a running game, cancelling any pending toggle that would resume
    pub fn pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.input.pause = true,
            GamePhase::Paused => self.input.pause = false,
            _ => {}
        }
    }

    /// Queue a start at the difficulty named by `label`
    ///
    /// Unknown labels leave everything unchanged and return false. A choice
    /// made on the welcome screen becomes the remembered default.
    pub fn select_difficulty(&mut self, label: &str) -> bool {
        match Difficulty::from_str(label) {
            Some(difficulty) => {
                self.input.start = Some(difficulty);
                if self.state.phase == GamePhase::WelcomeScreen
                    && self.settings.remember_difficulty(difficulty)
                {
                    self.settings_changed = true;
                }
                true
            }
            None => {
                log::warn!("Unknown difficulty {:?}, keeping current selection", label);
                false
            }
        }
    }

    pub fn start(&mut self, difficulty: Difficulty) {
        self.input.start = Some(difficulty);
    }

    pub fn restart(&mut self, kind: RestartKind) {
        self.input.restart = Some(kind);
    }

    /// True once after settings were edited, so the shell can persist them
    pub fn take_settings_changed(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }

    pub fn reset_high_score(&mut self) {
        self.high_score.reset();
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    /// Values for the UI display
    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state, self.high_score.best())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True while any one-shot command is still waiting for a tick
    pub fn has_pending_commands(&self) -> bool {
        self.input.has_commands()
    }
}
