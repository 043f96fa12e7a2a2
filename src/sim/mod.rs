//! Deterministic simulation module
//!
//! Maze generation, ball physics and collision response. This module must
//! stay pure and reproducible:
//! - Seeded RNG only
//! - Time enters only through the `Instant` handed to each frame
//! - No rendering or platform dependencies

pub mod arc;
pub mod ball;
pub mod carve;
pub mod collision;
pub mod exit;
pub mod maze;
pub mod state;
pub mod step;
pub mod tick;

pub use arc::ArcSegment;
pub use ball::{Ball, BallTuning};
pub use carve::{CarveGrid, carve};
pub use collision::{CollisionResolver, PolarBasis, resolve_cartesian, resolve_polar};
pub use exit::{CartesianEnds, Placement, PolarEnds};
pub use maze::{CartesianMaze, Maze, PlayRules, PolarMaze, Topology};
pub use state::MazeRun;
pub use step::{StepReport, Stepper};
pub use tick::{FrameReport, TickInput, tick};
