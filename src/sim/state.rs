//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned `GameState`.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{Color, random_palette_color};
use super::player::{Marker, MotionParams};
use super::registry::{DebuffKind, Entity, EntityId, EntityKind, EntityRegistry, PowerupKind};
use crate::consts::*;
use crate::spawn_x_range;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a difficulty selection
    WelcomeScreen,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended (lives depleted)
    GameOver,
}

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Fall speed and target spawn cadence for a difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Units per reference tick
    pub fall_speed: f32,
    /// Ticks between target spawns
    pub spawn_interval: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn params(&self) -> DifficultyParams {
        match self {
            Difficulty::Easy => DifficultyParams {
                fall_speed: 0.1,
                spawn_interval: 30,
            },
            Difficulty::Medium => DifficultyParams {
                fall_speed: 0.15,
                spawn_interval: 20,
            },
            Difficulty::Hard => DifficultyParams {
                fall_speed: 0.2,
                spawn_interval: 15,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label ("Easy", "Medium", "Hard")
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// How a restart is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartKind {
    /// Back to the welcome screen
    Full,
    /// Straight into a fresh run at the current difficulty
    Quick,
}

/// Slow motion modifier, active while ticks remain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlowMotion {
    pub remaining_ticks: u32,
}

impl SlowMotion {
    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }

    pub fn activate(&mut self, duration: u32) {
        self.remaining_ticks = duration;
    }
}

/// Things that happened during a tick, for UI and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started(Difficulty),
    TargetCaught,
    TargetMissed,
    PowerupCollected(PowerupKind),
    DebuffHit(DebuffKind),
    SlowMotionEnded,
    TargetColorChanged(Color),
    Paused,
    Resumed,
    Restarted(RestartKind),
    GameOver { final_score: u32 },
}

/// Tuning the simulation reads every tick
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    pub half_width: f32,
    pub half_height: f32,
    pub marker_max_speed: f32,
    pub marker_friction: f32,
    pub contact_distance: f32,
    pub color_transition_speed: f32,
    pub slow_motion_ticks: u32,
    pub slow_motion_factor: f32,
    /// `None` disables powerups entirely
    pub powerup_period: Option<u32>,
    /// `None` disables debuffs entirely
    pub debuff_period: Option<u32>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            half_width: PLAY_AREA_WIDTH / 2.0,
            half_height: PLAY_AREA_HEIGHT / 2.0,
            marker_max_speed: MARKER_MAX_SPEED,
            marker_friction: MARKER_FRICTION,
            contact_distance: COLLISION_DISTANCE,
            color_transition_speed: COLOR_TRANSITION_SPEED,
            slow_motion_ticks: SLOW_MOTION_DURATION_TICKS,
            slow_motion_factor: SLOW_MOTION_FACTOR,
            powerup_period: Some(POWERUP_SPAWN_PERIOD),
            debuff_period: Some(DEBUFF_SPAWN_PERIOD),
        }
    }
}

impl SimParams {
    /// Targets only: the variant without powerups, debuffs or slow motion
    pub fn classic() -> Self {
        Self {
            powerup_period: None,
            debuff_period: None,
            ..Self::default()
        }
    }

    pub fn motion(&self) -> MotionParams {
        MotionParams {
            max_speed: self.marker_max_speed,
            friction: self.marker_friction,
            half_width: self.half_width,
        }
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub params: SimParams,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter (Running ticks only)
    pub tick: u64,
    pub score: u32,
    pub lives: u8,
    pub difficulty: Difficulty,
    pub difficulty_params: DifficultyParams,
    pub slow_motion: SlowMotion,
    /// Logical color targets must match
    pub target_color: Color,
    pub marker: Marker,
    pub registry: EntityRegistry,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, SimParams::default())
    }

    pub fn with_params(seed: u64, params: SimParams) -> Self {
        let difficulty = Difficulty::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            marker: Marker::new(params.half_height),
            params,
            phase: GamePhase::WelcomeScreen,
            tick: 0,
            score: 0,
            lives: STARTING_LIVES,
            difficulty,
            difficulty_params: difficulty.params(),
            slow_motion: SlowMotion::default(),
            target_color: Color::YELLOW,
            registry: EntityRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Live falling entities in insertion order
    pub fn entities(&self) -> &[Entity] {
        self.registry.as_slice()
    }

    pub fn display_color(&self) -> Vec3 {
        self.marker.display_color
    }

    /// Fall speed after the slow motion modifier
    pub fn effective_fall_speed(&self) -> f32 {
        if self.slow_motion.is_active() {
            self.difficulty_params.fall_speed * self.params.slow_motion_factor
        } else {
            self.difficulty_params.fall_speed
        }
    }

    /// Target spawn interval after the slow motion modifier
    pub fn effective_spawn_interval(&self) -> u32 {
        if self.slow_motion.is_active() {
            self.difficulty_params.spawn_interval.saturating_mul(2)
        } else {
            self.difficulty_params.spawn_interval
        }
    }

    fn random_top_position(&mut self, half_size: f32) -> Vec2 {
        let (min_x, max_x) = spawn_x_range(self.params.half_width, half_size);
        let x = if max_x > min_x {
            self.rng.random_range(min_x..=max_x)
        } else {
            0.0
        };
        Vec2::new(x, self.params.half_height)
    }

    /// Spawn a target of a random palette color at the top edge
    pub fn spawn_target(&mut self) -> EntityId {
        let color = random_palette_color(&mut self.rng);
        let kind = EntityKind::Target { color };
        let pos = self.random_top_position(kind.half_size());
        self.registry.spawn(kind, pos)
    }

    /// Spawn a random powerup at the top edge
    pub fn spawn_powerup(&mut self) -> EntityId {
        let idx = self.rng.random_range(0..PowerupKind::ALL.len());
        let kind = EntityKind::Powerup(PowerupKind::ALL[idx]);
        let pos = self.random_top_position(kind.half_size());
        self.registry.spawn(kind, pos)
    }

    /// Spawn a bomb at the top edge
    pub fn spawn_debuff(&mut self) -> EntityId {
        let kind = EntityKind::Debuff(DebuffKind::InstantGameOver);
        let pos = self.random_top_position(kind.half_size());
        self.registry.spawn(kind, pos)
    }

    pub fn remove_entity(&mut self, id: EntityId) {
        self.registry.remove(id);
    }

    /// Pick a new random target color
    pub fn change_target_color(&mut self) -> Color {
        self.target_color = random_palette_color(&mut self.rng);
        self.events.push(GameEvent::TargetColorChanged(self.target_color));
        self.target_color
    }

    /// Clear the run: entities, score, lives, tick, marker motion, slow motion
    pub fn reset_run(&mut self) {
        self.registry.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.tick = 0;
        self.slow_motion = SlowMotion::default();
        self.marker.reset();
    }

    /// Leave the welcome screen (or restart) with the given difficulty
    pub fn start(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.difficulty_params = difficulty.params();
        self.reset_run();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started(difficulty));
        log::info!(
            "Game started on {} (fall speed {}, spawn interval {})",
            difficulty.label(),
            self.difficulty_params.fall_speed,
            self.difficulty_params.spawn_interval
        );
    }

    /// Restart from any phase; both paths empty the registry first
    pub fn restart(&mut self, kind: RestartKind) {
        self.reset_run();
        self.phase = match kind {
            RestartKind::Full => GamePhase::WelcomeScreen,
            RestartKind::Quick => GamePhase::Running,
        };
        self.events.push(GameEvent::Restarted(kind));
        log::info!("Restart ({:?}) -> {:?}", kind, self.phase);
    }

    /// Toggle between Running and Paused; ignored in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// Final score once the run has ended
    pub fn final_score(&self) -> Option<u32> {
        (self.phase == GamePhase::GameOver).then_some(self.score)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_table() {
        assert_eq!(
            Difficulty::Easy.params(),
            DifficultyParams {
                fall_speed: 0.1,
                spawn_interval: 30
            }
        );
        assert_eq!(Difficulty::Medium.params().spawn_interval, 20);
        assert_eq!(Difficulty::Hard.params().fall_speed, 0.2);
        assert_eq!(Difficulty::Hard.params().spawn_interval, 15);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str(" Hard "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::from_str(""), None);
    }

    #[test]
    fn test_new_state_on_welcome_screen() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::WelcomeScreen);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(state.entities().is_empty());
        assert_eq!(state.target_color, Color::YELLOW);
        assert_eq!(state.marker.pos, Vec2::new(0.0, -7.0));
    }

    #[test]
    fn test_spawns_stay_inside_width() {
        let mut state = GameState::new(42);
        for _ in 0..300 {
            state.spawn_target();
            state.spawn_powerup();
            state.spawn_debuff();
        }
        for e in state.entities() {
            let half = e.kind.half_size();
            assert!(e.pos.x - half >= -8.0 - 1e-5);
            assert!(e.pos.x + half <= 8.0 + 1e-5);
            assert_eq!(e.pos.y, 8.0);
        }
    }

    #[test]
    fn test_spawn_uses_both_sides() {
        let mut state = GameState::new(3);
        for _ in 0..200 {
            state.spawn_powerup();
        }
        assert!(state.entities().iter().any(|e| e.pos.x < -4.0));
        assert!(state.entities().iter().any(|e| e.pos.x > 4.0));
    }

    #[test]
    fn test_spawn_and_remove() {
        let mut state = GameState::new(5);
        let id = state.spawn_target();
        assert_eq!(state.entities().len(), 1);
        state.remove_entity(id);
        state.remove_entity(id);
        assert!(state.entities().is_empty());
    }

    #[test]
    fn test_seeded_spawns_are_deterministic() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..20 {
            a.spawn_target();
            b.spawn_target();
        }
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn test_start_sets_difficulty() {
        let mut state = GameState::new(1);
        state.start(Difficulty::Medium);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.difficulty_params.fall_speed, 0.15);
        assert_eq!(state.difficulty_params.spawn_interval, 20);
    }

    #[test]
    fn test_toggle_pause_only_in_play() {
        let mut state = GameState::new(1);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::WelcomeScreen);
        state.start(Difficulty::Easy);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_effective_modifiers() {
        let mut state = GameState::new(1);
        state.start(Difficulty::Easy);
        assert_eq!(state.effective_fall_speed(), 0.1);
        assert_eq!(state.effective_spawn_interval(), 30);
        state.slow_motion.activate(300);
        assert_eq!(state.effective_fall_speed(), 0.05);
        assert_eq!(state.effective_spawn_interval(), 60);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut state = GameState::new(8);
        state.start(Difficulty::Hard);
        for _ in 0..5 {
            state.spawn_target();
        }
        state.score = 4;
        state.lives = 1;
        state.tick = 77;
        state.marker.pos.x = 2.0;
        state.marker.velocity = 0.05;
        state.slow_motion.activate(10);

        state.restart(RestartKind::Full);
        let once = (
            state.phase,
            state.score,
            state.lives,
            state.tick,
            state.entities().len(),
            state.marker.pos,
            state.marker.velocity,
            state.slow_motion,
        );
        state.restart(RestartKind::Full);
        let twice = (
            state.phase,
            state.score,
            state.lives,
            state.tick,
            state.entities().len(),
            state.marker.pos,
            state.marker.velocity,
            state.slow_motion,
        );
        assert_eq!(once, twice);
        assert_eq!(once.0, GamePhase::WelcomeScreen);
        assert_eq!((once.1, once.2, once.3, once.4), (0, 3, 0, 0));
    }

    #[test]
    fn test_quick_restart_keeps_difficulty() {
        let mut state = GameState::new(8);
        state.start(Difficulty::Hard);
        state.spawn_debuff();
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.restart(RestartKind::Quick);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert!(state.entities().is_empty());
        assert_eq!(state.lives, 3);
    }
}
