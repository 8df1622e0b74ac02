//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order by entity ID)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod color;
pub mod player;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{Effect, Resolution, effect_of, resolve_position, touches};
pub use color::{Color, PALETTE};
pub use player::{HeldKeys, Marker, MotionParams};
pub use registry::{DebuffKind, Entity, EntityId, EntityKind, EntityRegistry, PowerupKind};
pub use state::{
    Difficulty, DifficultyParams, GameEvent, GamePhase, GameState, RestartKind, SimParams,
    SlowMotion,
};
pub use tick::{TickInput, tick};
