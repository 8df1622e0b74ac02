//! Target color palette and marker color smoothing
//!
//! The logical target color is an exact palette entry. The marker's displayed
//! color only chases it, so gameplay comparisons must never use the display value.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A 24-bit RGB color (`0xRRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const YELLOW: Color = Color(0xffff00);
    pub const BLUE: Color = Color(0x0000ff);
    pub const GREEN: Color = Color(0x00ff00);
    pub const RED: Color = Color(0xff0000);
    pub const CYAN: Color = Color(0x00ffff);

    /// Hex value
    pub fn hex(self) -> u32 {
        self.0 & 0x00ff_ffff
    }

    /// Channels as floats in [0, 1]
    pub fn to_rgb(self) -> Vec3 {
        let hex = self.hex();
        Vec3::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }
}

/// Colors falling targets (and the target color) are drawn from
pub const PALETTE: [Color; 4] = [Color::YELLOW, Color::BLUE, Color::GREEN, Color::RED];

/// Pick a palette entry uniformly at random
pub fn random_palette_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

/// Move `display` toward `target` by `factor` of the remaining distance
///
/// `steps` is the number of reference ticks covered (1.0 at the fixed timestep),
/// compounded so that two half steps equal one full step.
pub fn approach(display: Vec3, target: Color, factor: f32, steps: f32) -> Vec3 {
    let t = if steps == 1.0 {
        factor
    } else {
        1.0 - (1.0 - factor).powf(steps)
    };
    display.lerp(target.to_rgb(), t.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_to_rgb() {
        assert_eq!(Color::YELLOW.to_rgb(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(Color::BLUE.to_rgb(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_random_color_in_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            assert!(PALETTE.contains(&random_palette_color(&mut rng)));
        }
    }

    #[test]
    fn test_random_color_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let c = random_palette_color(&mut rng);
            let idx = PALETTE.iter().position(|p| *p == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_approach_fraction() {
        let start = Vec3::ZERO;
        let next = approach(start, Color::RED, 0.1, 1.0);
        assert!((next.x - 0.1).abs() < 1e-6);
        assert_eq!(next.y, 0.0);
        assert_eq!(next.z, 0.0);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let mut display = Color::BLUE.to_rgb();
        let target = Color::YELLOW.to_rgb();
        for _ in 0..500 {
            display = approach(display, Color::YELLOW, 0.1, 1.0);
            assert!(display.x <= target.x + 1e-6);
            assert!(display.z >= target.z - 1e-6);
        }
        assert!((display - target).length() < 1e-3);
    }

    #[test]
    fn test_approach_compounds_substeps() {
        let start = Vec3::ZERO;
        let half = approach(approach(start, Color::GREEN, 0.1, 0.5), Color::GREEN, 0.1, 0.5);
        let full = approach(start, Color::GREEN, 0.1, 1.0);
        assert!((half - full).length() < 1e-5);
    }
}
