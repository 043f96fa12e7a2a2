//! Shape generation for walls and markers

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::grid::{CartesianGeometry, CartesianGrid, PolarGeometry, PolarGrid};
use crate::sim::ArcSegment;

/// Points per sampled wall arc (five line segments)
pub const ARC_POINTS: usize = 6;

/// One drawable wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WallSegment {
    Line { from: Vec2, to: Vec2 },
    Arc(ArcSegment),
}

impl WallSegment {
    /// Line strip for renderers without arc primitives
    pub fn polyline(&self, arc_points: usize) -> Vec<Vec2> {
        match self {
            WallSegment::Line { from, to } => vec![*from, *to],
            WallSegment::Arc(arc) => arc.sample(arc_points.max(2)),
        }
    }
}

/// Every present wall of a rectangular maze
pub fn cartesian_walls(grid: &CartesianGrid, geometry: &CartesianGeometry) -> Vec<WallSegment> {
    let mut walls = Vec::new();

    for r in 0..=grid.rows() {
        let y = geometry.line_y(r);
        for c in 0..grid.cols() {
            if grid.horizontal(r, c) {
                walls.push(WallSegment::Line {
                    from: Vec2::new(geometry.line_x(c), y),
                    to: Vec2::new(geometry.line_x(c + 1), y),
                });
            }
        }
    }

    for r in 0..grid.rows() {
        for c in 0..=grid.cols() {
            if grid.vertical(r, c) {
                let x = geometry.line_x(c);
                walls.push(WallSegment::Line {
                    from: Vec2::new(x, geometry.line_y(r)),
                    to: Vec2::new(x, geometry.line_y(r + 1)),
                });
            }
        }
    }

    walls
}

/// Every present wall of a polar maze. The hub row is skipped, and ring 1
/// contributes arcs only.
pub fn polar_walls(grid: &PolarGrid, geometry: &PolarGeometry) -> Vec<WallSegment> {
    let step = geometry.angle_step();
    let mut walls = Vec::new();

    for ring in 1..grid.rings() {
        for sector in 0..grid.sectors() {
            let angle = geometry.spoke_angle(sector);
            if grid.arc(ring, sector) {
                walls.push(WallSegment::Arc(ArcSegment::new(
                    geometry.center,
                    geometry.arc_radius(ring),
                    0.0,
                    angle,
                    step,
                )));
            }
            if ring > 1 && grid.spoke(ring, sector) {
                walls.push(WallSegment::Line {
                    from: geometry.point(geometry.inner_radius(ring), angle),
                    to: geometry.point(geometry.arc_radius(ring), angle),
                });
            }
        }
    }

    walls
}

/// Closed outline of a circle, e.g. the ball or the exit marker
pub fn circle(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            center + Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, PolarCell, PolarDir, Side};
    use crate::sim::carve::CarveGrid;

    fn polar_geometry() -> PolarGeometry {
        PolarGeometry {
            rings: 9,
            sectors: 12,
            spacing: 13.0,
            center: Vec2::new(120.0, 120.0),
        }
    }

    #[test]
    fn test_closed_cartesian_grid_draws_every_wall() {
        let geo = CartesianGeometry {
            rows: 2,
            cols: 3,
            cell_size: 20.0,
            offset: 40.0,
        };
        let mut grid = CartesianGrid::new(2, 3);
        // 3 * 3 horizontal + 2 * 4 vertical
        assert_eq!(cartesian_walls(&grid, &geo).len(), 17);

        grid.open_wall(Cell::new(0, 0), Side::East);
        let walls = cartesian_walls(&grid, &geo);
        assert_eq!(walls.len(), 16);
        let opened = WallSegment::Line {
            from: Vec2::new(60.0, 40.0),
            to: Vec2::new(60.0, 60.0),
        };
        assert!(!walls.contains(&opened));
    }

    #[test]
    fn test_polar_walls_skip_hub() {
        let geo = polar_geometry();
        let mut grid = PolarGrid::new(9, 12);
        let walls = polar_walls(&grid, &geo);
        // Arcs on rings 1..=8, spokes on rings 2..=8
        assert_eq!(walls.len(), 8 * 12 + 7 * 12);
        for wall in &walls {
            match wall {
                WallSegment::Arc(arc) => assert!(arc.radius >= 2.0 * geo.spacing - 1e-4),
                WallSegment::Line { from, .. } => {
                    assert!((*from - geo.center).length() >= 2.0 * geo.spacing - 1e-3)
                }
            }
        }

        grid.open_wall(PolarCell::new(1, 0), PolarDir::Outward);
        assert_eq!(polar_walls(&grid, &geo).len(), 8 * 12 + 7 * 12 - 1);
        // A stored ring 1 spoke draws nothing
        assert!(grid.spoke(1, 5));
    }

    #[test]
    fn test_polyline_and_circle() {
        let line = WallSegment::Line {
            from: Vec2::ZERO,
            to: Vec2::X,
        };
        assert_eq!(line.polyline(ARC_POINTS), vec![Vec2::ZERO, Vec2::X]);

        let arc = WallSegment::Arc(ArcSegment::new(Vec2::ZERO, 26.0, 0.0, 0.0, 0.5));
        assert_eq!(arc.polyline(ARC_POINTS).len(), ARC_POINTS);

        let outline = circle(Vec2::new(5.0, 5.0), 4.0, 16);
        assert_eq!(outline.len(), 17);
        assert!((outline[0] - outline[16]).length() < 1e-4);
    }
}
