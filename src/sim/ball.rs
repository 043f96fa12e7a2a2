//! The rolling ball
//!
//! Velocity is driven by tilt with an explicit Euler update. Position only
//! changes through [`Ball::translate`], which the stepper calls between
//! collision checks.

use std::time::Instant;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, check_length};

/// Tilt-to-motion tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Velocity gained per degree of tilt per update
    pub gravity_gain: f32,
    /// Velocity multiplier applied every update
    pub friction: f32,
    /// Pixels per velocity unit per second
    pub speed_scale: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            gravity_gain: TILT_GAIN,
            friction: FRICTION,
            speed_scale: SPEED_SCALE,
        }
    }
}

impl BallTuning {
    pub fn validate(&self) -> Result<(), MazeError> {
        for (name, value) in [
            ("gravity_gain", self.gravity_gain),
            ("friction", self.friction),
            ("speed_scale", self.speed_scale),
        ] {
            if !value.is_finite() {
                return Err(MazeError::InvalidLength {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    tuning: BallTuning,
    last_update: Instant,
}

impl Ball {
    /// A ball at rest. Fails on a radius that is not positive and finite.
    pub fn new(
        pos: Vec2,
        radius: f32,
        tuning: BallTuning,
        now: Instant,
    ) -> Result<Self, MazeError> {
        check_length("ball_radius", radius)?;
        tuning.validate()?;
        Ok(Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            tuning,
            last_update: now,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn tuning(&self) -> &BallTuning {
        &self.tuning
    }

    pub fn last_update(&self) -> Instant {
        self.last_update
    }

    /// Accelerate from tilt (degrees), then apply friction.
    ///
    /// Pitch drives x and roll drives y, both inverted so the ball rolls
    /// towards the lowered edge.
    pub fn update_physics(&mut self, roll: f32, pitch: f32) {
        let gain = self.tuning.gravity_gain;
        self.vel.x += -pitch * gain;
        self.vel.y += -roll * gain;
        self.vel *= self.tuning.friction;
    }

    /// Displacement since the last call, using the monotonic clock
    pub fn consume_delta(&mut self) -> Option<Vec2> {
        self.consume_delta_at(Instant::now())
    }

    /// Displacement since the last call, measured up to `now`.
    ///
    /// Resets the time baseline. Returns `None` when the ball did not move,
    /// so the caller can skip collision work on idle frames.
    pub fn consume_delta_at(&mut self, now: Instant) -> Option<Vec2> {
        let elapsed = now.saturating_duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        let delta = self.vel * elapsed * self.tuning.speed_scale;
        (delta != Vec2::ZERO).then_some(delta)
    }

    /// Move without physics (stepper only)
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Place at `pos` at rest and restart the frame clock
    pub fn reset(&mut self, pos: Vec2, now: Instant) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.last_update = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ball_at_rest(now: Instant) -> Ball {
        Ball::new(Vec2::new(50.0, 50.0), BALL_RADIUS, BallTuning::default(), now).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_radius() {
        let now = Instant::now();
        for radius in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Ball::new(Vec2::ZERO, radius, BallTuning::default(), now),
                Err(MazeError::InvalidLength { name: "ball_radius", .. })
            ));
        }
        let tuning = BallTuning {
            friction: f32::NAN,
            ..BallTuning::default()
        };
        assert!(Ball::new(Vec2::ZERO, BALL_RADIUS, tuning, now).is_err());
    }

    #[test]
    fn test_tilt_accelerates_then_damps() {
        let now = Instant::now();
        let mut ball = ball_at_rest(now);
        ball.update_physics(10.0, -20.0);
        // pitch -20 -> +1.0 in x, roll 10 -> -0.5 in y, then friction
        assert!((ball.vel.x - 0.98).abs() < 1e-6);
        assert!((ball.vel.y + 0.49).abs() < 1e-6);

        ball.update_physics(0.0, 0.0);
        assert!((ball.vel.x - 0.98 * 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_consume_delta_scales_by_elapsed_time() {
        let start = Instant::now();
        let mut ball = ball_at_rest(start);
        ball.vel = Vec2::new(2.0, -1.0);

        let delta = ball.consume_delta_at(start + Duration::from_millis(100)).unwrap();
        // 2.0 * 0.1 s * 10
        assert!((delta.x - 2.0).abs() < 1e-5);
        assert!((delta.y + 1.0).abs() < 1e-5);
        assert_eq!(ball.last_update(), start + Duration::from_millis(100));

        // Consuming does not move the ball
        assert_eq!(ball.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_idle_frames_report_no_motion() {
        let start = Instant::now();
        let mut ball = ball_at_rest(start);
        assert_eq!(ball.consume_delta_at(start + Duration::from_millis(16)), None);

        // Moving ball, but the same instant twice gives zero elapsed time
        ball.vel = Vec2::new(1.0, 0.0);
        let t = start + Duration::from_millis(32);
        assert!(ball.consume_delta_at(t).is_some());
        assert_eq!(ball.consume_delta_at(t), None);
    }

    #[test]
    fn test_translate_and_reset() {
        let start = Instant::now();
        let mut ball = ball_at_rest(start);
        ball.vel = Vec2::new(3.0, 3.0);
        ball.translate(Vec2::new(1.5, -2.0));
        assert_eq!(ball.pos, Vec2::new(51.5, 48.0));
        assert_eq!(ball.vel, Vec2::new(3.0, 3.0));

        let later = start + Duration::from_secs(1);
        ball.reset(Vec2::new(10.0, 20.0), later);
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.last_update(), later);
        assert_eq!(ball.radius(), BALL_RADIUS);
    }
}
