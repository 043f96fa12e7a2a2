//! Maze settings and presets
//!
//! Loaded from JSON; any missing key falls back to the firmware defaults in
//! [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, check_count, check_length};
use crate::sim::ball::BallTuning;
use crate::sim::step::Stepper;

/// Built-in maze layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MazePreset {
    /// 8x8 square grid
    Rectangular,
    /// 9 rings x 12 sectors
    #[default]
    Circular,
    /// Circular maze with the clock overlay (12 sectors, one per hour)
    Clock,
}

impl MazePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            MazePreset::Rectangular => "Rectangular",
            MazePreset::Circular => "Circular",
            MazePreset::Clock => "Clock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "square" => Some(MazePreset::Rectangular),
            "circular" | "polar" | "round" => Some(MazePreset::Circular),
            "clock" => Some(MazePreset::Clock),
            _ => None,
        }
    }

    /// Whether this preset exposes a clock overlay
    pub fn has_clock(&self) -> bool {
        matches!(self, MazePreset::Clock)
    }
}

/// Grid shape and pixel geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySettings {
    Cartesian {
        rows: usize,
        cols: usize,
        /// Cell edge length in pixels
        cell_size: f32,
        /// Pixel offset of the grid's top-left corner (both axes)
        offset: f32,
    },
    Polar {
        /// Ring count including the open hub
        rings: usize,
        sectors: usize,
        /// Radial distance between consecutive arcs
        spacing: f32,
        center: Vec2,
    },
}

impl TopologySettings {
    pub fn rectangular() -> Self {
        TopologySettings::Cartesian {
            rows: RECT_ROWS,
            cols: RECT_COLS,
            cell_size: RECT_CELL_SIZE,
            offset: RECT_OFFSET,
        }
    }

    pub fn circular() -> Self {
        TopologySettings::Polar {
            rings: POLAR_RINGS,
            sectors: POLAR_SECTORS,
            spacing: POLAR_RING_SPACING,
            center: Vec2::new(POLAR_CENTER.0, POLAR_CENTER.1),
        }
    }
}

impl Default for TopologySettings {
    fn default() -> Self {
        Self::circular()
    }
}

/// Complete maze configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    /// RNG seed; identical settings and seed give identical mazes
    pub seed: u64,
    pub topology: TopologySettings,
    /// Whether the clock overlay is requested (polar, 12 sectors)
    pub clock: bool,

    // === Ball ===
    pub ball_radius: f32,
    pub ball: BallTuning,

    // === Collisions ===
    /// Fraction of the normal velocity kept (and reversed) on impact
    pub restitution: f32,
    pub step: Stepper,

    // === Exit ===
    /// Distance in pixels at which the ball counts as escaped
    pub exit_tolerance: f32,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            topology: TopologySettings::default(),
            clock: false,
            ball_radius: BALL_RADIUS,
            ball: BallTuning::default(),
            restitution: WALL_RESTITUTION,
            step: Stepper::default(),
            exit_tolerance: EXIT_TOLERANCE,
        }
    }
}

impl MazeSettings {
    /// Create settings from a preset (everything else at defaults)
    pub fn from_preset(preset: MazePreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Replace the topology with the preset's layout
    pub fn apply_preset(&mut self, preset: MazePreset) {
        match preset {
            MazePreset::Rectangular => {
                self.topology = TopologySettings::rectangular();
                self.clock = false;
            }
            MazePreset::Circular => {
                self.topology = TopologySettings::circular();
                self.clock = false;
            }
            MazePreset::Clock => {
                self.topology = TopologySettings::circular();
                self.clock = true;
            }
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, MazeError> {
        let settings: MazeSettings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded maze settings (seed {})", settings.seed);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, MazeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject degenerate grids and non-physical tuning
    pub fn validate(&self) -> Result<(), MazeError> {
        check_length("ball_radius", self.ball_radius)?;
        check_length("exit_tolerance", self.exit_tolerance)?;
        self.ball.validate()?;
        self.step.validate()?;

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(MazeError::InvalidLength {
                name: "restitution",
                value: self.restitution,
                reason: "must be within [0, 1]",
            });
        }

        let diameter = self.ball_radius * 2.0;
        match self.topology {
            TopologySettings::Cartesian {
                rows,
                cols,
                cell_size,
                offset,
            } => {
                check_count("rows", rows, 1)?;
                check_count("cols", cols, 1)?;
                check_count("cells", rows * cols, 2)?;
                check_length("cell_size", cell_size)?;
                if !offset.is_finite() {
                    return Err(MazeError::InvalidLength {
                        name: "offset",
                        value: offset,
                        reason: "must be finite",
                    });
                }
                if cell_size < diameter {
                    return Err(MazeError::InvalidLength {
                        name: "cell_size",
                        value: cell_size,
                        reason: "must fit the ball diameter",
                    });
                }
                if self.clock {
                    return Err(MazeError::ClockRequiresPolar);
                }
            }
            TopologySettings::Polar {
                rings,
                sectors,
                spacing,
                center,
            } => {
                check_count("rings", rings, 2)?;
                check_count("sectors", sectors, 2)?;
                check_length("spacing", spacing)?;
                if !center.is_finite() {
                    return Err(MazeError::InvalidLength {
                        name: "center",
                        value: f32::NAN,
                        reason: "must be finite",
                    });
                }
                if spacing < diameter {
                    return Err(MazeError::InvalidLength {
                        name: "spacing",
                        value: spacing,
                        reason: "must fit the ball diameter",
                    });
                }
                if self.clock && sectors != 12 {
                    return Err(MazeError::ClockRequiresTwelveSectors { sectors });
                }
            }
        }
        Ok(())
    }
}
