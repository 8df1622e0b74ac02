//! Hue Drop - A color-matching falling-shapes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `game`: Frame driver that owns the state, pending input and high score
//! - `renderer`: Flat vertex data for a 2D top-down draw
//! - `persistence`: High score storage backends
//! - `settings`: Data-driven game tuning

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Timestep the per-tick speeds below are expressed in
    pub const REFERENCE_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (world units, centered on the origin)
    pub const PLAY_AREA_WIDTH: f32 = 16.0;
    pub const PLAY_AREA_HEIGHT: f32 = 16.0;

    /// Player marker
    pub const MARKER_RADIUS: f32 = 0.5;
    /// Marker sits one unit above the bottom edge
    pub const MARKER_BOTTOM_OFFSET: f32 = 1.0;
    pub const MARKER_MAX_SPEED: f32 = 0.1;
    pub const MARKER_FRICTION: f32 = 0.95;

    /// Center distance below which an entity touches the marker
    pub const COLLISION_DISTANCE: f32 = 1.0;

    /// Falling shape sizes (full side length)
    pub const TARGET_SIZE: f32 = 0.5;
    pub const PICKUP_SIZE: f32 = 0.8;

    pub const STARTING_LIVES: u8 = 3;

    /// Fraction of the remaining RGB distance covered per tick
    pub const COLOR_TRANSITION_SPEED: f32 = 0.1;

    /// Slow motion
    pub const SLOW_MOTION_DURATION_TICKS: u32 = 300;
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;

    /// Independent spawn periods (ticks)
    pub const POWERUP_SPAWN_PERIOD: u32 = 300;
    pub const DEBUFF_SPAWN_PERIOD: u32 = 400;
}

/// Random x range for a shape of `half_size` so it lies fully inside the width
#[inline]
pub fn spawn_x_range(half_width: f32, half_size: f32) -> (f32, f32) {
    let limit = (half_width - half_size).max(0.0);
    (-limit, limit)
}
