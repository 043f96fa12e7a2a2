//! Draw data for an external renderer
//!
//! Nothing here touches pixels. The crate hands out wall segments, ball and
//! marker positions, and the optional clock face; a display driver turns
//! them into pixels.

pub mod shapes;

pub use shapes::{ARC_POINTS, WallSegment, cartesian_walls, circle, polar_walls};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clock::ClockFace;

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub walls: Vec<WallSegment>,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub exit: Vec2,
    pub spawn: Vec2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockFace>,
}

impl Scene {
    /// Flatten walls into line strips
    pub fn wall_polylines(&self) -> Vec<Vec<Vec2>> {
        self.walls.iter().map(|w| w.polyline(ARC_POINTS)).collect()
    }

    pub fn ball_outline(&self, segments: u32) -> Vec<Vec2> {
        circle(self.ball_pos, self.ball_radius, segments)
    }

    /// Filled outlines of the hour and minute hands, empty without a clock
    pub fn clock_hand_outlines(&self) -> Vec<Vec<Vec2>> {
        self.clock
            .iter()
            .flat_map(|face| {
                [
                    face.hour_hand.outline(ARC_POINTS),
                    face.minute_hand.outline(ARC_POINTS),
                ]
            })
            .collect()
    }
}
