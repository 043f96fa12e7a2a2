//! Maze orchestration
//!
//! A maze owns its wall grid, pixel geometry and seeded RNG. Every call to
//! `generate` resets the grid, carves it, and places a fresh exit and spawn.
//! The RNG is seeded once at construction, so successive levels differ while
//! the whole sequence stays reproducible from the seed.

use std::time::Instant;

use glam::Vec2;
use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::{Ball, BallTuning};
use super::carve::carve;
use super::collision::{CollisionResolver, resolve_cartesian, resolve_polar};
use super::exit::{CartesianEnds, Placement, PolarEnds, place_cartesian, place_polar};
use super::step::{StepReport, Stepper};
use crate::clock::ClockOverlay;
use crate::error::MazeError;
use crate::grid::{
    CartesianGeometry, CartesianGrid, Cell, PolarCell, PolarGeometry, PolarGrid, Side,
};
use crate::renderer::{WallSegment, cartesian_walls, polar_walls};
use crate::settings::{MazeSettings, TopologySettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Cartesian,
    Polar,
}

/// Ball and wall tuning shared by both topologies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRules {
    pub ball_radius: f32,
    pub tuning: BallTuning,
    pub restitution: f32,
    pub stepper: Stepper,
    pub exit_tolerance: f32,
}

impl PlayRules {
    fn from_settings(settings: &MazeSettings) -> Self {
        Self {
            ball_radius: settings.ball_radius,
            tuning: settings.ball,
            restitution: settings.restitution,
            stepper: settings.step,
            exit_tolerance: settings.exit_tolerance,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartesianMaze {
    grid: CartesianGrid,
    geometry: CartesianGeometry,
    rules: PlayRules,
    rng: Pcg32,
    ends: CartesianEnds,
    passages: usize,
}

impl CartesianMaze {
    fn new(geometry: CartesianGeometry, rules: PlayRules, seed: u64) -> Self {
        let mut maze = Self {
            grid: CartesianGrid::new(geometry.rows, geometry.cols),
            geometry,
            rules,
            rng: Pcg32::seed_from_u64(seed),
            ends: placeholder_cartesian_ends(&geometry),
            passages: 0,
        };
        maze.generate();
        maze
    }

    pub fn generate(&mut self) -> usize {
        self.grid.reset();
        let start = Cell::new(
            self.rng.random_range(0..self.geometry.rows),
            self.rng.random_range(0..self.geometry.cols),
        );
        self.passages = carve(&mut self.grid, start, &mut self.rng);
        self.ends = place_cartesian(&self.grid, &self.geometry, &mut self.rng);
        self.passages
    }

    pub fn grid(&self) -> &CartesianGrid {
        &self.grid
    }

    pub fn geometry(&self) -> &CartesianGeometry {
        &self.geometry
    }

    pub fn ends(&self) -> &CartesianEnds {
        &self.ends
    }
}

impl CollisionResolver for CartesianMaze {
    fn resolve(&self, ball: &mut Ball) -> bool {
        resolve_cartesian(&self.grid, &self.geometry, self.rules.restitution, ball)
    }
}

#[derive(Debug, Clone)]
pub struct PolarMaze {
    grid: PolarGrid,
    geometry: PolarGeometry,
    rules: PlayRules,
    rng: Pcg32,
    ends: PolarEnds,
    passages: usize,
}

impl PolarMaze {
    fn new(geometry: PolarGeometry, rules: PlayRules, seed: u64) -> Self {
        let mut maze = Self {
            grid: PolarGrid::new(geometry.rings, geometry.sectors),
            geometry,
            rules,
            rng: Pcg32::seed_from_u64(seed),
            ends: placeholder_polar_ends(&geometry),
            passages: 0,
        };
        maze.generate();
        maze
    }

    /// Carve from a random sector of the outer ring. The hub stays open.
    pub fn generate(&mut self) -> usize {
        self.grid.reset();
        let start = PolarCell::new(
            self.geometry.rings - 1,
            self.rng.random_range(0..self.geometry.sectors),
        );
        self.passages = carve(&mut self.grid, start, &mut self.rng);
        self.ends = place_polar(&self.grid, &self.geometry, &mut self.rng);
        self.passages
    }

    pub fn grid(&self) -> &PolarGrid {
        &self.grid
    }

    pub fn geometry(&self) -> &PolarGeometry {
        &self.geometry
    }

    pub fn ends(&self) -> &PolarEnds {
        &self.ends
    }
}

impl CollisionResolver for PolarMaze {
    fn resolve(&self, ball: &mut Ball) -> bool {
        resolve_polar(&self.grid, &self.geometry, self.rules.restitution, ball)
    }
}

// Overwritten by the first generate()
fn placeholder_cartesian_ends(geometry: &CartesianGeometry) -> CartesianEnds {
    let cell = Cell::new(0, 0);
    let at = Placement {
        cell,
        pixel: geometry.cell_center(cell),
    };
    CartesianEnds {
        exit: at,
        exit_side: Side::North,
        spawn: at,
    }
}

fn placeholder_polar_ends(geometry: &PolarGeometry) -> PolarEnds {
    let cell = PolarCell::new(geometry.rings - 1, 0);
    let at = Placement {
        cell,
        pixel: geometry.cell_center(cell),
    };
    PolarEnds { exit: at, spawn: at }
}

/// A generated maze of either topology
#[derive(Debug, Clone)]
pub enum Maze {
    Cartesian(CartesianMaze),
    Polar(PolarMaze),
}

impl Maze {
    /// Validate settings and generate the first layout
    pub fn new(settings: &MazeSettings) -> Result<Self, MazeError> {
        settings.validate()?;
        let rules = PlayRules::from_settings(settings);

        let maze = match settings.topology {
            TopologySettings::Cartesian {
                rows,
                cols,
                cell_size,
                offset,
            } => Maze::Cartesian(CartesianMaze::new(
                CartesianGeometry {
                    rows,
                    cols,
                    cell_size,
                    offset,
                },
                rules,
                settings.seed,
            )),
            TopologySettings::Polar {
                rings,
                sectors,
                spacing,
                center,
            } => Maze::Polar(PolarMaze::new(
                PolarGeometry {
                    rings,
                    sectors,
                    spacing,
                    center,
                },
                rules,
                settings.seed,
            )),
        };

        info!(
            "Generated {:?} maze (seed {}, {} passages)",
            maze.topology(),
            settings.seed,
            maze.passages()
        );
        Ok(maze)
    }

    /// Re-carve with the next RNG draws. Returns the passage count.
    pub fn generate(&mut self) -> usize {
        let passages = match self {
            Maze::Cartesian(maze) => maze.generate(),
            Maze::Polar(maze) => maze.generate(),
        };
        info!("Regenerated {:?} maze ({} passages)", self.topology(), passages);
        passages
    }

    pub fn topology(&self) -> Topology {
        match self {
            Maze::Cartesian(_) => Topology::Cartesian,
            Maze::Polar(_) => Topology::Polar,
        }
    }

    /// Open passages carved by the last generation
    pub fn passages(&self) -> usize {
        match self {
            Maze::Cartesian(maze) => maze.passages,
            Maze::Polar(maze) => maze.passages,
        }
    }

    pub fn rules(&self) -> &PlayRules {
        match self {
            Maze::Cartesian(maze) => &maze.rules,
            Maze::Polar(maze) => &maze.rules,
        }
    }

    fn resolver(&self) -> &dyn CollisionResolver {
        match self {
            Maze::Cartesian(maze) => maze,
            Maze::Polar(maze) => maze,
        }
    }

    /// Current walls as draw data
    pub fn wall_segments(&self) -> Vec<WallSegment> {
        match self {
            Maze::Cartesian(maze) => cartesian_walls(&maze.grid, &maze.geometry),
            Maze::Polar(maze) => polar_walls(&maze.grid, &maze.geometry),
        }
    }

    /// One collision pass against the walls of the ball's cell
    pub fn handle_collisions(&self, ball: &mut Ball) -> bool {
        self.resolver().resolve(ball)
    }

    /// Move the ball by `delta` in collision-checked sub-steps
    pub fn step_ball(&self, ball: &mut Ball, delta: Vec2) -> StepReport {
        self.rules().stepper.step(ball, delta, self.resolver())
    }

    pub fn spawn_pixel(&self) -> Vec2 {
        match self {
            Maze::Cartesian(maze) => maze.ends.spawn.pixel,
            Maze::Polar(maze) => maze.ends.spawn.pixel,
        }
    }

    pub fn exit_pixel(&self) -> Vec2 {
        match self {
            Maze::Cartesian(maze) => maze.ends.exit.pixel,
            Maze::Polar(maze) => maze.ends.exit.pixel,
        }
    }

    pub fn ball_at_exit(&self, ball: &Ball) -> bool {
        let tolerance = self.rules().exit_tolerance;
        ball.pos.distance_squared(self.exit_pixel()) <= tolerance * tolerance
    }

    /// A resting ball on the spawn
    pub fn spawn_ball(&self, now: Instant) -> Result<Ball, MazeError> {
        let rules = self.rules();
        Ball::new(self.spawn_pixel(), rules.ball_radius, rules.tuning, now)
    }

    /// Put `ball` back on the spawn at rest
    pub fn reset_ball(&self, ball: &mut Ball, now: Instant) {
        ball.reset(self.spawn_pixel(), now);
    }

    /// Clock geometry around the maze (12-sector polar mazes only)
    pub fn clock_overlay(&self) -> Result<ClockOverlay, MazeError> {
        match self {
            Maze::Polar(maze) => ClockOverlay::new(maze.geometry),
            Maze::Cartesian(_) => Err(MazeError::ClockRequiresPolar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MazePreset;
    use proptest::prelude::*;
    use std::collections::{HashSet, VecDeque};

    /// Cells reachable from `start` through open passages, counted once each
    fn reachable_cartesian(grid: &CartesianGrid, start: Cell) -> HashSet<Cell> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for next in grid.open_neighbors(cell) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn reachable_polar(grid: &PolarGrid, start: PolarCell) -> HashSet<PolarCell> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for next in grid.open_neighbors(cell) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn rectangular(seed: u64) -> Maze {
        Maze::new(&MazeSettings::from_preset(MazePreset::Rectangular).with_seed(seed)).unwrap()
    }

    fn circular(seed: u64) -> Maze {
        Maze::new(&MazeSettings::from_preset(MazePreset::Circular).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_rectangular_spanning_tree() {
        let Maze::Cartesian(maze) = rectangular(42) else {
            panic!("expected a rectangular maze");
        };
        assert_eq!(maze.passages, 63);
        assert_eq!(maze.grid.passage_count(), 63);
        assert_eq!(reachable_cartesian(&maze.grid, Cell::new(0, 0)).len(), 64);
        // outer boundary untouched
        for (cell, side) in maze.grid.perimeter() {
            assert!(maze.grid.has_wall(cell, side));
        }
    }

    #[test]
    fn test_polar_spanning_tree_and_hub() {
        let Maze::Polar(maze) = circular(42) else {
            panic!("expected a polar maze");
        };
        assert_eq!(maze.grid.hub_wall_count(), 0);
        for ring in 1..9 {
            for sector in 0..12 {
                assert!(maze.grid.is_cell_visited(PolarCell::new(ring, sector)));
            }
        }
        assert_eq!(maze.grid.playable_cells(), 8 * 12);
        assert_eq!(maze.passages, maze.grid.playable_cells() - 1);
        assert_eq!(maze.grid.passage_count(), 8 * 12 - 1);
        let reached = reachable_polar(&maze.grid, maze.ends.spawn.cell);
        assert_eq!(reached.len(), 8 * 12);
        // perimeter stays closed
        for sector in 0..12 {
            assert!(maze.grid.arc(8, sector));
        }
    }

    #[test]
    fn test_same_seed_same_walls() {
        for maze_of in [rectangular as fn(u64) -> Maze, circular] {
            let a = maze_of(1234);
            let b = maze_of(1234);
            assert_eq!(a.wall_segments(), b.wall_segments());
            assert_eq!(a.exit_pixel(), b.exit_pixel());
            assert_eq!(a.spawn_pixel(), b.spawn_pixel());
        }
        let a = rectangular(1);
        let b = rectangular(2);
        assert_ne!(a.wall_segments(), b.wall_segments());
    }

    #[test]
    fn test_regenerate_keeps_tree_property() {
        let mut maze = circular(9);
        let first = maze.wall_segments();
        for _ in 0..5 {
            assert_eq!(maze.generate(), 95);
        }
        assert_ne!(maze.wall_segments(), first);
        if let Maze::Polar(polar) = &maze {
            assert_eq!(polar.grid.hub_wall_count(), 0);
        }
    }

    #[test]
    fn test_exit_reachable_from_spawn() {
        for seed in 0..10 {
            let Maze::Cartesian(maze) = rectangular(seed) else {
                unreachable!()
            };
            let reached = reachable_cartesian(&maze.grid, maze.ends.spawn.cell);
            assert_ne!(maze.ends.spawn.cell, maze.ends.exit.cell);
            assert!(reached.contains(&maze.ends.exit.cell));
            assert!(maze.grid.step(maze.ends.exit.cell, maze.ends.exit_side).is_none());
        }
    }

    #[test]
    fn test_ball_at_exit_tolerance() {
        let maze = rectangular(5);
        let now = Instant::now();
        let mut ball = maze.spawn_ball(now).unwrap();
        assert!(!maze.ball_at_exit(&ball));
        ball.pos = maze.exit_pixel() + Vec2::new(6.0, 8.0);
        assert!(maze.ball_at_exit(&ball));
        ball.pos = maze.exit_pixel() + Vec2::new(6.0, 8.1);
        assert!(!maze.ball_at_exit(&ball));

        ball.vel = Vec2::new(3.0, 1.0);
        maze.reset_ball(&mut ball, now);
        assert_eq!(ball.pos, maze.spawn_pixel());
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_handle_collisions_dispatches_by_topology() {
        let maze = rectangular(3);
        let now = Instant::now();
        let mut ball = maze.spawn_ball(now).unwrap();
        // 1 px into the left outer wall of the grid
        ball.pos = Vec2::new(43.0, 50.0);
        ball.vel = Vec2::new(-2.0, 0.0);
        assert!(maze.handle_collisions(&mut ball));
        assert_eq!(ball.pos.x, 44.0);
        assert_eq!(ball.vel.x, 0.5);

        let maze = circular(3);
        let mut ball = maze.spawn_ball(now).unwrap();
        ball.pos = Vec2::new(120.0, 120.0);
        assert!(!maze.handle_collisions(&mut ball));
    }

    #[test]
    fn test_step_ball_stays_inside_perimeter() {
        let maze = circular(11);
        let mut ball = maze.spawn_ball(Instant::now()).unwrap();
        // Fling it straight outward from the spawn
        let outward = (maze.spawn_pixel() - Vec2::new(120.0, 120.0)).normalize();
        ball.vel = outward * 50.0;
        let report = maze.step_ball(&mut ball, outward * 40.0);
        assert!(report.collisions > 0);
        assert!((ball.pos - Vec2::new(120.0, 120.0)).length() <= 117.0 - 4.0 + 1e-3);
    }

    #[test]
    fn test_clock_overlay_availability() {
        let clock = Maze::new(&MazeSettings::from_preset(MazePreset::Clock)).unwrap();
        assert!(clock.clock_overlay().is_ok());
        assert_eq!(
            rectangular(0).clock_overlay().unwrap_err(),
            MazeError::ClockRequiresPolar
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = MazeSettings::from_preset(MazePreset::Circular);
        settings.topology = TopologySettings::Polar {
            rings: 1,
            sectors: 12,
            spacing: 13.0,
            center: Vec2::new(120.0, 120.0),
        };
        assert!(matches!(
            Maze::new(&settings),
            Err(MazeError::InvalidDimension { name: "rings", .. })
        ));
    }

    #[test]
    fn test_thin_strip_maze() {
        let mut settings = MazeSettings::from_preset(MazePreset::Rectangular);
        settings.topology = TopologySettings::Cartesian {
            rows: 1,
            cols: 2,
            cell_size: 20.0,
            offset: 0.0,
        };
        let Maze::Cartesian(maze) = Maze::new(&settings).unwrap() else {
            unreachable!()
        };
        assert_eq!(maze.passages, 1);
        assert!(!maze.grid.has_wall(Cell::new(0, 0), Side::East));
        assert_ne!(maze.ends.spawn.cell, maze.ends.exit.cell);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_cartesian_perfect(seed in any::<u64>(), rows in 1usize..12, cols in 2usize..12) {
            let mut settings = MazeSettings::from_preset(MazePreset::Rectangular).with_seed(seed);
            settings.topology = TopologySettings::Cartesian { rows, cols, cell_size: 20.0, offset: 0.0 };
            let Maze::Cartesian(maze) = Maze::new(&settings).unwrap() else { unreachable!() };

            prop_assert_eq!(maze.grid.passage_count(), rows * cols - 1);
            prop_assert_eq!(reachable_cartesian(&maze.grid, Cell::new(0, 0)).len(), rows * cols);
            prop_assert_ne!(maze.ends.spawn.cell, maze.ends.exit.cell);
        }

        #[test]
        fn prop_polar_perfect(seed in any::<u64>(), rings in 2usize..10, sectors in 2usize..16) {
            let mut settings = MazeSettings::from_preset(MazePreset::Circular).with_seed(seed);
            settings.topology = TopologySettings::Polar {
                rings,
                sectors,
                spacing: 13.0,
                center: Vec2::new(120.0, 120.0),
            };
            let Maze::Polar(maze) = Maze::new(&settings).unwrap() else { unreachable!() };
            let playable = (rings - 1) * sectors;

            prop_assert_eq!(maze.grid.hub_wall_count(), 0);
            prop_assert_eq!(maze.grid.passage_count(), playable - 1);
            prop_assert_eq!(reachable_polar(&maze.grid, PolarCell::new(1, 0)).len(), playable);
            prop_assert_ne!(maze.ends.spawn.cell, maze.ends.exit.cell);
        }
    }
}
