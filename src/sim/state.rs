//! Run state
//!
//! Everything that lives across frames: the maze, its ball and the level
//! counters. A run starts on level 1 and moves up a level every time the
//! ball reaches the exit.

use std::time::Instant;

use super::ball::Ball;
use super::maze::Maze;
use crate::clock::{ClockOverlay, ClockTime};
use crate::error::MazeError;
use crate::renderer::Scene;
use crate::settings::MazeSettings;

#[derive(Debug, Clone)]
pub struct MazeRun {
    pub maze: Maze,
    pub ball: Ball,
    /// 1-based level, incremented on every escape
    pub level: u32,
    /// Frames ticked since the run started
    pub frames: u64,
    /// Frames ticked on the current level
    pub level_frames: u64,
    clock: Option<ClockOverlay>,
}

impl MazeRun {
    /// Build the first maze and put the ball on its spawn
    pub fn new(settings: &MazeSettings, now: Instant) -> Result<Self, MazeError> {
        let maze = Maze::new(settings)?;
        let clock = if settings.clock {
            Some(maze.clock_overlay()?)
        } else {
            None
        };
        let ball = maze.spawn_ball(now)?;
        Ok(Self {
            maze,
            ball,
            level: 1,
            frames: 0,
            level_frames: 0,
            clock,
        })
    }

    pub fn clock(&self) -> Option<&ClockOverlay> {
        self.clock.as_ref()
    }

    /// Carve the next level and restart the ball on its spawn
    pub fn advance_level(&mut self, now: Instant) {
        self.level += 1;
        self.level_frames = 0;
        self.maze.generate();
        self.maze.reset_ball(&mut self.ball, now);
    }

    /// Snapshot for the renderer. The clock face is only included when the
    /// run has an overlay and a time is supplied.
    pub fn scene(&self, time: Option<ClockTime>) -> Scene {
        Scene {
            walls: self.maze.wall_segments(),
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius(),
            exit: self.maze.exit_pixel(),
            spawn: self.maze.spawn_pixel(),
            clock: self.clock.as_ref().zip(time).map(|(overlay, t)| overlay.face(t)),
        }
    }
}
