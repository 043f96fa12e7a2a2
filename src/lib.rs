//! Tilt Maze - perfect mazes for a rolling ball
//!
//! Core modules:
//! - `grid`: Wall storage for rectangular and polar (ring/sector) mazes
//! - `sim`: Deterministic generation, ball physics, collisions, run loop
//! - `renderer`: Draw data handed to an external renderer
//! - `clock`: Clock-face overlay geometry for the 12-sector polar maze
//! - `settings`: Data-driven maze and physics configuration

pub mod clock;
pub mod error;
pub mod grid;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::MazeError;
pub use settings::{MazePreset, MazeSettings};

use glam::Vec2;

/// Maze and physics defaults
pub mod consts {
    /// Rectangular maze defaults (240x240 round display, square inset)
    pub const RECT_ROWS: usize = 8;
    pub const RECT_COLS: usize = 8;
    pub const RECT_CELL_SIZE: f32 = 20.0;
    pub const RECT_OFFSET: f32 = 40.0;

    /// Polar maze defaults
    pub const POLAR_RINGS: usize = 9;
    pub const POLAR_SECTORS: usize = 12;
    pub const POLAR_RING_SPACING: f32 = 13.0;
    pub const POLAR_CENTER: (f32, f32) = (120.0, 120.0);

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 4.0;
    /// Velocity gained per degree of tilt per frame
    pub const TILT_GAIN: f32 = 0.05;
    /// Multiplicative damping applied every physics update
    pub const FRICTION: f32 = 0.98;
    /// Pixels per (velocity unit * second)
    pub const SPEED_SCALE: f32 = 10.0;

    /// Fraction of the normal velocity kept (and flipped) on a wall hit
    pub const WALL_RESTITUTION: f32 = 0.25;

    /// Maximum substeps per frame
    pub const MAX_SUBSTEPS: u32 = 32;

    /// Ball counts as escaped within this many pixels of the exit
    pub const EXIT_TOLERANCE: f32 = 10.0;

    /// Below this distance from the polar centre the angle is undefined
    pub const POLAR_EPSILON: f32 = 1e-6;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta) around `center`, theta in [0, 2π)
#[inline]
pub fn cartesian_to_polar(center: Vec2, pos: Vec2) -> (f32, f32) {
    let rel = pos - center;
    (rel.length(), wrap_angle(rel.y.atan2(rel.x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_polar_roundtrip_around_center() {
        let center = Vec2::new(120.0, 120.0);
        let p = polar_to_cartesian(center, 50.0, 1.0);
        let (r, theta) = cartesian_to_polar(center, p);
        assert!((r - 50.0).abs() < 1e-4);
        assert!((theta - 1.0).abs() < 1e-5);
    }
}
