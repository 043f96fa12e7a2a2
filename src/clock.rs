//! Clock-face overlay for the 12-sector polar maze
//!
//! Pure geometry: the caller supplies the time. Hands are thick arcs just
//! outside the perimeter, hour labels sit one ring further out and line up
//! with the maze spokes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::grid::PolarGeometry;
use crate::sim::ArcSegment;
use crate::wrap_angle;

pub const HOUR_HAND_WIDTH_DEG: f32 = 20.0;
pub const MINUTE_HAND_WIDTH_DEG: f32 = 12.0;
pub const HOUR_HAND_THICKNESS: f32 = 10.0;
pub const MINUTE_HAND_THICKNESS: f32 = 8.0;

const CLOCK_SECTORS: usize = 12;

/// Wall-clock time handed in by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    /// Any value, read modulo 12
    pub hour: u32,
    /// 0..60
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute: minute % 60,
        }
    }

    /// Hour hand position in clock degrees (0 at 12 o'clock, clockwise)
    pub fn hour_degrees(&self) -> f32 {
        ((self.hour % 12) as f32 + self.minute as f32 / 60.0) / 12.0 * 360.0
    }

    /// Minute hand position in clock degrees
    pub fn minute_degrees(&self) -> f32 {
        self.minute as f32 / 60.0 * 360.0
    }
}

/// Screen angle for a clock angle. Screen y points down, so angles grow
/// clockwise and 12 o'clock is at -90°.
#[inline]
pub fn clock_to_screen(degrees: f32) -> f32 {
    wrap_angle((degrees - 90.0).to_radians())
}

/// Spoke index lined up with `hour`
#[inline]
pub fn sector_for_hour(hour: u32) -> usize {
    ((hour + 9) % 12) as usize
}

/// Hour shown next to spoke `sector`
#[inline]
pub fn hour_for_sector(sector: usize) -> u32 {
    ((sector + 2) % 12) as u32 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourLabel {
    pub hour: u32,
    pub sector: usize,
    pub pos: Vec2,
}

/// Everything drawn on top of the maze for one time value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockFace {
    pub hour_hand: ArcSegment,
    pub minute_hand: ArcSegment,
    pub labels: Vec<HourLabel>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockOverlay {
    geometry: PolarGeometry,
}

impl ClockOverlay {
    pub fn new(geometry: PolarGeometry) -> Result<Self, MazeError> {
        if geometry.sectors != CLOCK_SECTORS {
            return Err(MazeError::ClockRequiresTwelveSectors {
                sectors: geometry.sectors,
            });
        }
        Ok(Self { geometry })
    }

    /// Radius of the hand arcs, one spacing outside the perimeter
    pub fn hand_radius(&self) -> f32 {
        (self.geometry.rings + 1) as f32 * self.geometry.spacing
    }

    pub fn label_radius(&self) -> f32 {
        (self.geometry.rings + 2) as f32 * self.geometry.spacing
    }

    pub fn hour_hand(&self, time: ClockTime) -> ArcSegment {
        ArcSegment::centered(
            self.geometry.center,
            self.hand_radius(),
            HOUR_HAND_THICKNESS,
            clock_to_screen(time.hour_degrees()),
            HOUR_HAND_WIDTH_DEG.to_radians(),
        )
    }

    pub fn minute_hand(&self, time: ClockTime) -> ArcSegment {
        ArcSegment::centered(
            self.geometry.center,
            self.hand_radius(),
            MINUTE_HAND_THICKNESS,
            clock_to_screen(time.minute_degrees()),
            MINUTE_HAND_WIDTH_DEG.to_radians(),
        )
    }

    /// Twelve hour numbers, one per spoke
    pub fn labels(&self) -> Vec<HourLabel> {
        let radius = self.label_radius();
        (0..CLOCK_SECTORS)
            .map(|sector| HourLabel {
                hour: hour_for_sector(sector),
                sector,
                pos: self.geometry.point(radius, self.geometry.spoke_angle(sector)),
            })
            .collect()
    }

    pub fn face(&self, time: ClockTime) -> ClockFace {
        ClockFace {
            hour_hand: self.hour_hand(time),
            minute_hand: self.minute_hand(time),
            labels: self.labels(),
        }
    }
}
