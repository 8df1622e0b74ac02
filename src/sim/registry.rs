//! Falling entity storage
//!
//! Entities are kept in insertion order and identified by a monotonically
//! increasing id. Removal during a tick is mark-then-compact (`retain`), so
//! no entity is skipped or updated twice.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::{PICKUP_SIZE, TARGET_SIZE};

/// Stable identity of a falling entity
pub type EntityId = u32;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Halves fall speed and target spawn cadence for a while
    SlowDown,
    /// Reserved, collecting it has no gameplay effect yet
    TimeFreeze,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::SlowDown, PowerupKind::TimeFreeze];

    /// Marker color used when drawing the pickup
    pub fn color(self) -> Color {
        match self {
            PowerupKind::SlowDown => Color::GREEN,
            PowerupKind::TimeFreeze => Color::CYAN,
        }
    }
}

/// Debuff types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebuffKind {
    InstantGameOver,
}

impl DebuffKind {
    pub fn color(self) -> Color {
        match self {
            DebuffKind::InstantGameOver => Color::RED,
        }
    }
}

/// What a falling entity is, with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Target { color: Color },
    Powerup(PowerupKind),
    Debuff(DebuffKind),
}

impl EntityKind {
    /// Half of the shape's side length
    pub fn half_size(&self) -> f32 {
        match self {
            EntityKind::Target { .. } => TARGET_SIZE / 2.0,
            EntityKind::Powerup(_) | EntityKind::Debuff(_) => PICKUP_SIZE / 2.0,
        }
    }

    /// Color the entity is drawn with
    pub fn draw_color(&self) -> Color {
        match self {
            EntityKind::Target { color } => *color,
            EntityKind::Powerup(kind) => kind.color(),
            EntityKind::Debuff(kind) => kind.color(),
        }
    }
}

/// A falling entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
}

/// Owns every live falling entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a new entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity { id, kind, pos });
        id
    }

    /// Remove by identity; no-op if already gone
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    /// Keep only entities for which `f` returns true
    pub fn retain_mut<F: FnMut(&mut Entity) -> bool>(&mut self, f: F) {
        self.entities.retain_mut(f);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity and restart id allocation
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 1;
    }
}
