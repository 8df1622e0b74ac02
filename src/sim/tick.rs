//! Simulation tick
//!
//! Core game loop that advances the session by one step.

use super::collision::{Effect, Resolution, effect_of, resolve_position};
use super::color::approach;
use super::player::HeldKeys;
use super::registry::EntityKind;
use super::state::{Difficulty, GameEvent, GamePhase, GameState, RestartKind};
use crate::consts::REFERENCE_DT;

/// Input for a single tick
///
/// `keys` is level state; everything else is a one-shot command that the
/// caller clears once a tick has consumed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held direction keys
    pub keys: HeldKeys,
    /// Pick a new target color
    pub change_color: bool,
    /// Pause toggle
    pub pause: bool,
    /// Difficulty chosen on the welcome screen
    pub start: Option<Difficulty>,
    /// Restart request
    pub restart: Option<RestartKind>,
}

impl TickInput {
    /// True if any one-shot command is pending
    pub fn has_commands(&self) -> bool {
        self.change_color || self.pause || self.start.is_some() || self.restart.is_some()
    }

    /// Drop one-shot commands, keeping held keys
    pub fn clear_commands(&mut self) {
        self.change_color = false;
        self.pause = false;
        self.start = None;
        self.restart = None;
    }
}

/// Advance the game state by one tick covering `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(kind) = input.restart {
        state.restart(kind);
    }

    if let Some(difficulty) = input.start {
        if state.phase == GamePhase::WelcomeScreen {
            state.start(difficulty);
        } else {
            log::debug!("Ignoring difficulty selection while {:?}", state.phase);
        }
    }

    if input.pause {
        state.toggle_pause();
    }

    // Color triggers apply in every phase
    if input.change_color {
        let color = state.change_target_color();
        log::debug!("Target color -> {:06x}", color.hex());
    }

    // Welcome, paused and game over freeze the simulation
    if state.phase != GamePhase::Running {
        return;
    }

    let steps = dt / REFERENCE_DT;
    state.tick += 1;

    // Modifiers for this tick are taken before the timer counts down, so a
    // freshly collected slow down lasts exactly its duration in ticks.
    let fall_speed = state.effective_fall_speed();
    let target_interval = state.effective_spawn_interval();
    if state.slow_motion.is_active() {
        state.slow_motion.remaining_ticks -= 1;
        if !state.slow_motion.is_active() {
            state.events.push(GameEvent::SlowMotionEnded);
            log::debug!("Slow motion ended at tick {}", state.tick);
        }
    }

    spawn_scheduled(state, target_interval);
    advance_entities(state, fall_speed * steps);

    let motion = state.params.motion();
    state.marker.update(input.keys, &motion, steps);
    state.marker.display_color = approach(
        state.marker.display_color,
        state.target_color,
        state.params.color_transition_speed,
        steps,
    );

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!("Game over at tick {} with score {}", state.tick, state.score);
    }
}

/// Spawn targets, powerups and debuffs whose cadence lands on this tick
fn spawn_scheduled(state: &mut GameState, target_interval: u32) {
    let t = state.tick;
    if is_due(t, Some(target_interval)) {
        state.spawn_target();
    }
    if is_due(t, state.params.powerup_period) {
        state.spawn_powerup();
    }
    if is_due(t, state.params.debuff_period) {
        state.spawn_debuff();
    }
}

fn is_due(tick: u64, period: Option<u32>) -> bool {
    match period {
        Some(p) if p > 0 => tick % p as u64 == 0,
        _ => false,
    }
}

/// Move every entity down, drop the ones that left, apply the ones caught
fn advance_entities(state: &mut GameState, distance: f32) {
    let marker_pos = state.marker.pos;
    let half_height = state.params.half_height;
    let contact = state.params.contact_distance;

    let mut collected = Vec::new();
    state.registry.retain_mut(|entity| {
        entity.pos.y -= distance;
        match resolve_position(entity.pos, marker_pos, half_height, contact) {
            Resolution::Alive => true,
            Resolution::OffScreen => false,
            Resolution::Collected => {
                collected.push(entity.kind);
                false
            }
        }
    });

    for kind in collected {
        match effect_of(&kind, state.target_color) {
            Effect::Score => {
                state.score = state.score.saturating_add(1);
                state.events.push(GameEvent::TargetCaught);
            }
            Effect::LoseLife => {
                state.lives = state.lives.saturating_sub(1);
                state.events.push(GameEvent::TargetMissed);
            }
            Effect::SlowMotion => {
                state.slow_motion.activate(state.params.slow_motion_ticks);
                if let EntityKind::Powerup(p) = kind {
                    state.events.push(GameEvent::PowerupCollected(p));
                }
                log::debug!("Slow motion for {} ticks", state.params.slow_motion_ticks);
            }
            Effect::TimeFreeze => {
                // Extension hook: collected and reported, no gameplay change
                if let EntityKind::Powerup(p) = kind {
                    state.events.push(GameEvent::PowerupCollected(p));
                }
            }
            Effect::GameOver => {
                state.lives = 0;
                if let EntityKind::Debuff(d) = kind {
                    state.events.push(GameEvent::DebuffHit(d));
                }
            }
        }
    }
}
