//! Sub-stepped ball movement
//!
//! A frame's displacement can be several wall thicknesses long when the ball
//! is fast. Moving it in slices no longer than half the ball radius, and
//! resolving collisions after every slice, keeps it from tunnelling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::CollisionResolver;
use crate::consts::MAX_SUBSTEPS;
use crate::error::{MazeError, check_count};

/// Sub-step limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stepper {
    /// Longest slice in pixels; `None` (or <= 0) means half the ball radius
    pub max_step_px: Option<f32>,
    /// Cap on slices per frame
    pub max_substeps: u32,
}

impl Default for Stepper {
    fn default() -> Self {
        Self {
            max_step_px: None,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

/// What one frame of stepping did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Slices taken, equal to resolver invocations
    pub substeps: u32,
    /// Slices whose resolve moved the ball
    pub collisions: u32,
}

impl Stepper {
    pub fn validate(&self) -> Result<(), MazeError> {
        check_count("max_substeps", self.max_substeps as usize, 1)?;
        if let Some(step) = self.max_step_px {
            if !step.is_finite() {
                return Err(MazeError::InvalidLength {
                    name: "max_step_px",
                    value: step,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }

    /// Effective slice length for a ball of `radius`
    pub fn max_step(&self, radius: f32) -> f32 {
        match self.max_step_px {
            Some(step) if step > 0.0 => step,
            _ => radius * 0.5,
        }
    }

    /// Slices needed for `delta`, in `[1, max_substeps]`
    pub fn substeps(&self, delta: Vec2, radius: f32) -> u32 {
        let max_axis = delta.x.abs().max(delta.y.abs());
        let wanted = (max_axis / self.max_step(radius)).ceil();
        let cap = self.max_substeps.max(1);
        if wanted.is_nan() || wanted < 1.0 {
            1
        } else if wanted >= cap as f32 {
            cap
        } else {
            wanted as u32
        }
    }

    /// Move `ball` by `delta`, resolving collisions after every slice
    pub fn step<R: CollisionResolver + ?Sized>(
        &self,
        ball: &mut Ball,
        delta: Vec2,
        resolver: &R,
    ) -> StepReport {
        let substeps = self.substeps(delta, ball.radius());
        let slice = delta / substeps as f32;
        let mut report = StepReport {
            substeps,
            collisions: 0,
        };

        for _ in 0..substeps {
            ball.translate(slice);
            if resolver.resolve(ball) {
                report.collisions += 1;
            }
        }

        report
    }
}
