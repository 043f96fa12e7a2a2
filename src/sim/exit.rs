//! Exit and spawn placement
//!
//! Runs once per generation, after carving. The exit sits on the perimeter
//! and the spawn is put as far from it as the maze allows. Perimeter walls
//! are never opened; the exit is a target point inside the perimeter cell.

use std::fmt::Debug;

use glam::Vec2;
use log::{debug, warn};
use rand::Rng;

use crate::grid::{
    CartesianGeometry, CartesianGrid, Cell, PolarCell, PolarGeometry, PolarGrid, Side,
};

/// A cell with its cached pixel position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<C> {
    pub cell: C,
    pub pixel: Vec2,
}

/// Exit and spawn of a rectangular maze
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianEnds {
    pub exit: Placement<Cell>,
    /// Outer wall the exit cell sits against
    pub exit_side: Side,
    pub spawn: Placement<Cell>,
}

/// Exit and spawn of a polar maze, both on the outer ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarEnds {
    pub exit: Placement<PolarCell>,
    pub spawn: Placement<PolarCell>,
}

/// Pick the spawn: the preferred candidate if usable, otherwise the carved
/// perimeter cell farthest from the exit, otherwise `default`.
fn choose_spawn<C: Copy + PartialEq + Debug>(
    exit: Placement<C>,
    candidate: C,
    perimeter: impl IntoIterator<Item = C>,
    is_carved: impl Fn(C) -> bool,
    pixel_of: impl Fn(C) -> Vec2,
    default: C,
) -> Placement<C> {
    if candidate != exit.cell && is_carved(candidate) {
        return Placement {
            cell: candidate,
            pixel: pixel_of(candidate),
        };
    }

    let mut ranked: Vec<Placement<C>> = perimeter
        .into_iter()
        .filter(|&cell| cell != exit.cell && is_carved(cell))
        .map(|cell| Placement {
            cell,
            pixel: pixel_of(cell),
        })
        .collect();
    // Stable sort keeps the walk order among equally distant cells
    ranked.sort_by(|a, b| {
        let da = a.pixel.distance_squared(exit.pixel);
        let db = b.pixel.distance_squared(exit.pixel);
        db.total_cmp(&da)
    });

    if let Some(spawn) = ranked.first() {
        debug!("Spawn candidate {:?} unusable, using {:?}", candidate, spawn.cell);
        return *spawn;
    }

    warn!("No carved perimeter cell left for the spawn, defaulting to {:?}", default);
    Placement {
        cell: default,
        pixel: pixel_of(default),
    }
}

/// Exit on a random perimeter cell, spawn on its mirror image
pub fn place_cartesian<R: Rng + ?Sized>(
    grid: &CartesianGrid,
    geometry: &CartesianGeometry,
    rng: &mut R,
) -> CartesianEnds {
    let perimeter = grid.perimeter();
    let (exit_cell, exit_side) = perimeter[rng.random_range(0..perimeter.len())];
    let exit = Placement {
        cell: exit_cell,
        pixel: geometry.cell_center(exit_cell),
    };

    let mirrored = Cell::new(
        grid.rows() - 1 - exit_cell.row,
        grid.cols() - 1 - exit_cell.col,
    );
    let spawn = choose_spawn(
        exit,
        mirrored,
        perimeter.iter().map(|(cell, _)| *cell),
        |cell| grid.is_cell_visited(cell),
        |cell| geometry.cell_center(cell),
        Cell::new(0, 0),
    );

    debug!(
        "Exit at {:?} ({:?} wall), spawn at {:?}",
        exit.cell, exit_side, spawn.cell
    );
    CartesianEnds {
        exit,
        exit_side,
        spawn,
    }
}

/// Exit in a random outer-ring sector, spawn in the opposite sector
pub fn place_polar<R: Rng + ?Sized>(
    grid: &PolarGrid,
    geometry: &PolarGeometry,
    rng: &mut R,
) -> PolarEnds {
    let sectors = grid.sectors();
    let outer = grid.rings() - 1;
    let exit_cell = PolarCell::new(outer, rng.random_range(0..sectors));
    let exit = Placement {
        cell: exit_cell,
        pixel: geometry.cell_center(exit_cell),
    };

    let opposite = PolarCell::new(outer, (exit_cell.sector + sectors / 2) % sectors);
    let spawn = choose_spawn(
        exit,
        opposite,
        (0..sectors).map(|s| PolarCell::new(outer, s)),
        |cell| grid.is_cell_visited(cell),
        |cell| geometry.cell_center(cell),
        PolarCell::new(outer, 0),
    );

    debug!("Exit in sector {}, spawn in sector {}", exit.cell.sector, spawn.cell.sector);
    PolarEnds { exit, spawn }
}
