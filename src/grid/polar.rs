//! Polar wall grid (concentric rings x angular sectors)
//!
//! Storage convention, shared by generation, collision and draw data:
//! - `circular[r][s]`: arc at radius `(r + 1) * spacing` across sector `s`,
//!   the outer boundary of ring `r`. Row `rings - 1` is the perimeter.
//! - `radial[r][s]`: spoke at angle `s * step` across ring `r`'s annulus
//!   `[r * spacing, (r + 1) * spacing]`, between sectors `s - 1` and `s`.
//!
//! Ring 0 is the hub. It has no walls, is never carved into and counts as
//! visited from the start, so ring 1 opens onto it all the way round.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::WallMatrix;
use crate::consts::POLAR_EPSILON;
use crate::sim::carve::CarveGrid;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// The open centre ring
pub const HUB_RING: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolarCell {
    pub ring: usize,
    pub sector: usize,
}

impl PolarCell {
    pub const fn new(ring: usize, sector: usize) -> Self {
        Self { ring, sector }
    }
}

/// Carve directions. Clockwise is increasing sector index, which is
/// increasing angle (clockwise on a y-down screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolarDir {
    Outward,
    Inward,
    Clockwise,
    CounterClockwise,
}

impl PolarDir {
    pub const ALL: [PolarDir; 4] = [
        PolarDir::Outward,
        PolarDir::Inward,
        PolarDir::Clockwise,
        PolarDir::CounterClockwise,
    ];
}

/// Pixel layout of a polar grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarGeometry {
    /// Ring count including the hub
    pub rings: usize,
    pub sectors: usize,
    /// Radial distance between consecutive arcs
    pub spacing: f32,
    pub center: Vec2,
}

/// Where a point sits on the polar grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarLocation {
    /// Distance from the centre
    pub r: f32,
    /// Angle in [0, 2π)
    pub theta: f32,
    /// Containing cell, clamped into the grid
    pub cell: PolarCell,
}

impl PolarGeometry {
    #[inline]
    pub fn angle_step(&self) -> f32 {
        TAU / self.sectors as f32
    }

    /// Radius of the arc on the inner boundary of `ring`
    #[inline]
    pub fn inner_radius(&self, ring: usize) -> f32 {
        ring as f32 * self.spacing
    }

    /// Radius of the arc on the outer boundary of `ring` (`circular[ring]`)
    #[inline]
    pub fn arc_radius(&self, ring: usize) -> f32 {
        (ring + 1) as f32 * self.spacing
    }

    /// Radius of the perimeter arc
    pub fn outer_radius(&self) -> f32 {
        self.rings as f32 * self.spacing
    }

    /// Angle of the spoke `radial[_][sector]`
    #[inline]
    pub fn spoke_angle(&self, sector: usize) -> f32 {
        sector as f32 * self.angle_step()
    }

    #[inline]
    pub fn sector_mid_angle(&self, sector: usize) -> f32 {
        (sector as f32 + 0.5) * self.angle_step()
    }

    /// Radius halfway between the arcs of `ring`
    #[inline]
    pub fn ring_mid_radius(&self, ring: usize) -> f32 {
        (ring as f32 + 0.5) * self.spacing
    }

    pub fn point(&self, r: f32, theta: f32) -> Vec2 {
        polar_to_cartesian(self.center, r, theta)
    }

    /// Centre of a cell (mid-radius, mid-angle)
    pub fn cell_center(&self, cell: PolarCell) -> Vec2 {
        self.point(self.ring_mid_radius(cell.ring), self.sector_mid_angle(cell.sector))
    }

    /// Locate `pos`, or `None` when it is too close to the centre to have a
    /// meaningful angle
    pub fn locate(&self, pos: Vec2) -> Option<PolarLocation> {
        let (r, theta) = cartesian_to_polar(self.center, pos);
        if r.is_nan() || r <= POLAR_EPSILON {
            return None;
        }
        let ring = ((r / self.spacing).floor() as usize).min(self.rings - 1);
        // theta can round to exactly 2π
        let sector = ((theta / self.angle_step()).floor() as usize).min(self.sectors - 1);
        Some(PolarLocation {
            r,
            theta,
            cell: PolarCell::new(ring, sector),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolarGrid {
    rings: usize,
    sectors: usize,
    radial: WallMatrix,
    circular: WallMatrix,
    visited: WallMatrix,
}

impl PolarGrid {
    /// All walls present outside the hub, only the hub visited
    pub fn new(rings: usize, sectors: usize) -> Self {
        let mut grid = Self {
            rings,
            sectors,
            radial: WallMatrix::new(rings, sectors, true),
            circular: WallMatrix::new(rings, sectors, true),
            visited: WallMatrix::new(rings, sectors, false),
        };
        grid.open_hub();
        grid
    }

    /// Restore every wall, forget visits, re-open the hub
    pub fn reset(&mut self) {
        self.radial.fill(true);
        self.circular.fill(true);
        self.visited.fill(false);
        self.open_hub();
    }

    fn open_hub(&mut self) {
        self.radial.fill_row(HUB_RING, false);
        self.circular.fill_row(HUB_RING, false);
        self.visited.fill_row(HUB_RING, true);
    }

    #[inline]
    pub fn rings(&self) -> usize {
        self.rings
    }

    #[inline]
    pub fn sectors(&self) -> usize {
        self.sectors
    }

    /// Cells outside the hub
    pub fn playable_cells(&self) -> usize {
        self.rings.saturating_sub(1) * self.sectors
    }

    /// Arc on the outer boundary of `ring` across `sector`
    #[inline]
    pub fn arc(&self, ring: usize, sector: usize) -> bool {
        self.circular.get(ring, sector)
    }

    /// Spoke at the start angle of `sector` across `ring`'s annulus
    #[inline]
    pub fn spoke(&self, ring: usize, sector: usize) -> bool {
        self.radial.get(ring, sector)
    }

    pub fn arc_walls(&self) -> &WallMatrix {
        &self.circular
    }

    pub fn spoke_walls(&self) -> &WallMatrix {
        &self.radial
    }

    #[inline]
    fn cw(&self, sector: usize) -> usize {
        (sector + 1) % self.sectors
    }

    #[inline]
    fn ccw(&self, sector: usize) -> usize {
        (sector + self.sectors - 1) % self.sectors
    }

    /// Whether `cell` has a wall towards `dir`
    pub fn has_wall(&self, cell: PolarCell, dir: PolarDir) -> bool {
        let PolarCell { ring, sector } = cell;
        match dir {
            PolarDir::Outward => self.arc(ring, sector),
            PolarDir::Inward => ring > 0 && self.arc(ring - 1, sector),
            PolarDir::Clockwise => self.spoke(ring, self.cw(sector)),
            PolarDir::CounterClockwise => self.spoke(ring, sector),
        }
    }

    pub fn is_cell_visited(&self, cell: PolarCell) -> bool {
        self.visited.get(cell.ring, cell.sector)
    }

    /// Neighbour inside the playable rings `[1, rings - 1]`, regardless of
    /// walls. Sectors wrap.
    pub fn step(&self, cell: PolarCell, dir: PolarDir) -> Option<PolarCell> {
        let PolarCell { ring, sector } = cell;
        let next = match dir {
            PolarDir::Outward => PolarCell::new(ring + 1, sector),
            PolarDir::Inward => PolarCell::new(ring.checked_sub(1)?, sector),
            PolarDir::Clockwise => PolarCell::new(ring, self.cw(sector)),
            PolarDir::CounterClockwise => PolarCell::new(ring, self.ccw(sector)),
        };
        (next.ring > HUB_RING && next.ring < self.rings).then_some(next)
    }

    /// Playable neighbours reachable through an open wall
    pub fn open_neighbors(&self, cell: PolarCell) -> impl Iterator<Item = PolarCell> + '_ {
        PolarDir::ALL
            .into_iter()
            .filter(move |&dir| !self.has_wall(cell, dir))
            .filter_map(move |dir| self.step(cell, dir))
    }

    /// Open walls between two playable cells
    pub fn passage_count(&self) -> usize {
        let mut open = 0;
        // arcs between ring r and r + 1, both playable
        for r in 1..self.rings.saturating_sub(1) {
            open += self.sectors - self.circular.count_row(r);
        }
        for r in 1..self.rings {
            open += self.sectors - self.radial.count_row(r);
        }
        open
    }

    /// Walls recorded for the hub row (always zero)
    pub fn hub_wall_count(&self) -> usize {
        self.radial.count_row(HUB_RING) + self.circular.count_row(HUB_RING)
    }
}

impl CarveGrid for PolarGrid {
    type Cell = PolarCell;
    type Dir = PolarDir;

    fn directions() -> [PolarDir; 4] {
        PolarDir::ALL
    }

    fn neighbor(&self, cell: PolarCell, dir: PolarDir) -> Option<PolarCell> {
        self.step(cell, dir)
    }

    fn is_visited(&self, cell: PolarCell) -> bool {
        self.is_cell_visited(cell)
    }

    fn mark_visited(&mut self, cell: PolarCell) {
        self.visited.set(cell.ring, cell.sector, true);
    }

    fn open_wall(&mut self, cell: PolarCell, dir: PolarDir) {
        let PolarCell { ring, sector } = cell;
        match dir {
            PolarDir::Outward => self.circular.set(ring, sector, false),
            PolarDir::Inward => self.circular.set(ring - 1, sector, false),
            PolarDir::Clockwise => {
                let spoke = self.cw(sector);
                self.radial.set(ring, spoke, false)
            }
            PolarDir::CounterClockwise => self.radial.set(ring, sector, false),
        }
    }
}
