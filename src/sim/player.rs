//! Player marker movement
//!
//! Held direction keys snap the velocity to full speed; releasing both lets
//! friction glide the marker to a stop. The marker never leaves the play area.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::*;

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// Movement tuning for the marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub max_speed: f32,
    pub friction: f32,
    /// Half the play-area width
    pub half_width: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            max_speed: MARKER_MAX_SPEED,
            friction: MARKER_FRICTION,
            half_width: PLAY_AREA_WIDTH / 2.0,
        }
    }
}

/// The player's marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub pos: Vec2,
    /// Horizontal velocity (units per reference tick)
    pub velocity: f32,
    pub radius: f32,
    /// Color shown on screen, chasing the target color
    pub display_color: Vec3,
}

impl Marker {
    pub fn new(half_height: f32) -> Self {
        Self {
            pos: Vec2::new(0.0, -half_height + MARKER_BOTTOM_OFFSET),
            velocity: 0.0,
            radius: MARKER_RADIUS,
            display_color: Color::YELLOW.to_rgb(),
        }
    }

    /// Horizontal bounds for the marker center
    pub fn x_bounds(&self, half_width: f32) -> (f32, f32) {
        (-half_width + self.radius, half_width - self.radius)
    }

    /// Center the marker and stop it (display color is kept)
    pub fn reset(&mut self) {
        self.pos.x = 0.0;
        self.velocity = 0.0;
    }

    /// Integrate one tick of movement
    ///
    /// `steps` is the number of reference ticks covered (1.0 at the fixed timestep).
    pub fn update(&mut self, keys: HeldKeys, params: &MotionParams, steps: f32) {
        self.velocity = match (keys.left, keys.right) {
            (true, false) => -params.max_speed,
            (false, true) => params.max_speed,
            _ => {
                if steps == 1.0 {
                    self.velocity * params.friction
                } else {
                    self.velocity * params.friction.powf(steps)
                }
            }
        };

        self.pos.x += self.velocity * steps;

        let (min_x, max_x) = self.x_bounds(params.half_width);
        if self.pos.x < min_x {
            self.pos.x = min_x;
            self.velocity = 0.0;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEFT: HeldKeys = HeldKeys {
        left: true,
        right: false,
    };
    const RIGHT: HeldKeys = HeldKeys {
        left: false,
        right: true,
    };

    #[test]
    fn test_held_key_sets_full_speed() {
        let mut marker = Marker::new(8.0);
        marker.update(RIGHT, &MotionParams::default(), 1.0);
        assert_eq!(marker.velocity, MARKER_MAX_SPEED);
        assert!((marker.pos.x - MARKER_MAX_SPEED).abs() < 1e-6);

        marker.update(LEFT, &MotionParams::default(), 1.0);
        assert_eq!(marker.velocity, -MARKER_MAX_SPEED);
    }

    #[test]
    fn test_friction_glides_without_reaching_zero() {
        let mut marker = Marker::new(8.0);
        marker.velocity = 0.1;
        let params = MotionParams::default();
        marker.update(HeldKeys::default(), &params, 1.0);
        assert!((marker.velocity - 0.095).abs() < 1e-6);
        for _ in 0..50 {
            marker.update(HeldKeys::default(), &params, 1.0);
        }
        assert!(marker.velocity > 0.0);
        assert!(marker.velocity < 0.01);
    }

    #[test]
    fn test_both_keys_act_like_neither() {
        let mut marker = Marker::new(8.0);
        marker.velocity = 0.1;
        let both = HeldKeys {
            left: true,
            right: true,
        };
        marker.update(both, &MotionParams::default(), 1.0);
        assert!((marker.velocity - 0.095).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_stops_at_wall() {
        let mut marker = Marker::new(8.0);
        let params = MotionParams::default();
        for _ in 0..200 {
            marker.update(RIGHT, &params, 1.0);
        }
        assert_eq!(marker.pos.x, 7.5);
        assert_eq!(marker.velocity, 0.0);

        // Releasing at the wall does not leave stored velocity
        marker.update(HeldKeys::default(), &params, 1.0);
        assert_eq!(marker.pos.x, 7.5);
    }

    #[test]
    fn test_reset_keeps_color() {
        let mut marker = Marker::new(8.0);
        marker.pos.x = 3.0;
        marker.velocity = 0.1;
        marker.display_color = Color::BLUE.to_rgb();
        marker.reset();
        assert_eq!(marker.pos.x, 0.0);
        assert_eq!(marker.velocity, 0.0);
        assert_eq!(marker.display_color, Color::BLUE.to_rgb());
    }

    proptest! {
        #[test]
        fn prop_marker_stays_in_bounds(
            inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 0..600),
        ) {
            let mut marker = Marker::new(8.0);
            let params = MotionParams::default();
            for (left, right) in inputs {
                marker.update(HeldKeys { left, right }, &params, 1.0);
                prop_assert!(marker.pos.x >= -7.5 && marker.pos.x <= 7.5);
            }
        }
    }
}
