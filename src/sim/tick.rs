//! Per-frame simulation tick
//!
//! One call per display frame: tilt feeds the ball's velocity, the time since
//! the last frame turns velocity into a displacement, and the stepper moves
//! the ball through the maze in collision-checked slices.

use std::time::Instant;

use log::info;

use super::state::MazeRun;
use super::step::StepReport;

/// Tilt for a single frame, in degrees (unvalidated)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub roll: f32,
    pub pitch: f32,
}

impl TickInput {
    pub fn new(roll: f32, pitch: f32) -> Self {
        Self { roll, pitch }
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Run-wide frame number, starting at 1
    pub frame: u64,
    /// Whether the ball had a non-zero displacement this frame
    pub moved: bool,
    pub step: StepReport,
    /// Ball reached the exit; the maze has already been regenerated
    pub escaped: bool,
    /// Level after this frame
    pub level: u32,
}

/// Advance the run by one frame ending at `now`
pub fn tick(run: &mut MazeRun, input: &TickInput, now: Instant) -> FrameReport {
    run.frames += 1;
    run.level_frames += 1;

    run.ball.update_physics(input.roll, input.pitch);

    let mut report = FrameReport {
        frame: run.frames,
        level: run.level,
        ..Default::default()
    };

    if let Some(delta) = run.ball.consume_delta_at(now) {
        report.moved = true;
        report.step = run.maze.step_ball(&mut run.ball, delta);
    }

    if run.maze.ball_at_exit(&run.ball) {
        info!("Escaped level {} in {} frames", run.level, run.level_frames);
        run.advance_level(now);
        report.escaped = true;
        report.level = run.level;
    }

    report
}
