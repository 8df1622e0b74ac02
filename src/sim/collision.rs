//! Proximity collision between falling entities and the marker
//!
//! Shapes are treated as points for contact purposes: an entity touches the
//! marker when the center distance drops below the marker radius plus margin.

use glam::Vec2;

use super::color::Color;
use super::registry::{DebuffKind, EntityKind, PowerupKind};

/// How a falling entity left play this tick (if it did)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Still falling
    Alive,
    /// Fell past the bottom edge
    OffScreen,
    /// Touched the marker
    Collected,
}

/// Classify an entity after it has moved
///
/// The off-screen test runs first, so an entity that crosses the bottom edge
/// is never also collected in the same tick.
pub fn resolve_position(
    pos: Vec2,
    marker_pos: Vec2,
    half_height: f32,
    contact_distance: f32,
) -> Resolution {
    if pos.y < -half_height {
        Resolution::OffScreen
    } else if touches(pos, marker_pos, contact_distance) {
        Resolution::Collected
    } else {
        Resolution::Alive
    }
}

/// Strict distance test against the contact threshold
#[inline]
pub fn touches(a: Vec2, b: Vec2, contact_distance: f32) -> bool {
    a.distance_squared(b) < contact_distance * contact_distance
}

/// Gameplay consequence of collecting an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Caught a target of the right color
    Score,
    /// Caught a target of the wrong color
    LoseLife,
    /// Start (or restart) slow motion
    SlowMotion,
    /// Time freeze hook; no gameplay effect
    TimeFreeze,
    /// Lives drop straight to zero
    GameOver,
}

/// Decide what collecting `kind` does, comparing against the logical target color
pub fn effect_of(kind: &EntityKind, target_color: Color) -> Effect {
    match kind {
        EntityKind::Target { color } if *color == target_color => Effect::Score,
        EntityKind::Target { .. } => Effect::LoseLife,
        EntityKind::Powerup(PowerupKind::SlowDown) => Effect::SlowMotion,
        EntityKind::Powerup(PowerupKind::TimeFreeze) => Effect::TimeFreeze,
        EntityKind::Debuff(DebuffKind::InstantGameOver) => Effect::GameOver,
    }
}
