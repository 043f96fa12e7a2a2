//! Randomized depth-first carve (recursive backtracker)
//!
//! Entering a cell marks it visited and shuffles its four directions. Each
//! direction is tried in shuffled order; an in-bounds unvisited neighbour has
//! the wall between them removed and is entered next. Because a wall is only
//! opened towards an unvisited cell, the open passages form a spanning tree.
//!
//! The walk uses an explicit stack of frames instead of recursion. Frames
//! remember where they are in their shuffled direction list, so the RNG is
//! consumed and cells are visited in exactly the recursive order.

use rand::Rng;
use rand::seq::SliceRandom;

/// A grid that the carver can walk
pub trait CarveGrid {
    type Cell: Copy;
    type Dir: Copy;

    /// The four directions, in canonical (pre-shuffle) order
    fn directions() -> [Self::Dir; 4];

    /// Neighbour in `dir`, or `None` when it is outside the carvable region
    fn neighbor(&self, cell: Self::Cell, dir: Self::Dir) -> Option<Self::Cell>;

    fn is_visited(&self, cell: Self::Cell) -> bool;

    fn mark_visited(&mut self, cell: Self::Cell);

    /// Clear the wall between `cell` and its neighbour in `dir`
    fn open_wall(&mut self, cell: Self::Cell, dir: Self::Dir);
}

struct Frame<C, D> {
    cell: C,
    dirs: [D; 4],
    next: usize,
}

fn enter<G: CarveGrid, R: Rng + ?Sized>(
    grid: &mut G,
    cell: G::Cell,
    rng: &mut R,
) -> Frame<G::Cell, G::Dir> {
    grid.mark_visited(cell);
    let mut dirs = G::directions();
    dirs.shuffle(rng);
    Frame { cell, dirs, next: 0 }
}

/// Carve a perfect maze from `start`. Returns the number of passages opened.
pub fn carve<G: CarveGrid, R: Rng + ?Sized>(grid: &mut G, start: G::Cell, rng: &mut R) -> usize {
    let mut passages = 0;
    let first = enter(grid, start, rng);
    let mut stack = vec![first];

    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = frame.dirs[frame.next];
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = grid.neighbor(cell, dir) else {
            continue;
        };
        if grid.is_visited(next) {
            continue;
        }

        grid.open_wall(cell, dir);
        passages += 1;
        let child = enter(grid, next, rng);
        stack.push(child);
    }

    passages
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// 1-D corridor: only East/West matter, the carve must open every gap
    struct Corridor {
        visited: Vec<bool>,
        open: Vec<bool>,
    }

    #[derive(Clone, Copy)]
    enum Dir {
        North,
        South,
        West,
        East,
    }

    impl CarveGrid for Corridor {
        type Cell = usize;
        type Dir = Dir;

        fn directions() -> [Dir; 4] {
            [Dir::North, Dir::South, Dir::West, Dir::East]
        }

        fn neighbor(&self, cell: usize, dir: Dir) -> Option<usize> {
            match dir {
                Dir::West => cell.checked_sub(1),
                Dir::East => (cell + 1 < self.visited.len()).then_some(cell + 1),
                Dir::North | Dir::South => None,
            }
        }

        fn is_visited(&self, cell: usize) -> bool {
            self.visited[cell]
        }

        fn mark_visited(&mut self, cell: usize) {
            self.visited[cell] = true;
        }

        fn open_wall(&mut self, cell: usize, dir: Dir) {
            match dir {
                Dir::West => self.open[cell - 1] = true,
                Dir::East => self.open[cell] = true,
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_corridor_fully_opened() {
        let mut grid = Corridor {
            visited: vec![false; 10],
            open: vec![false; 9],
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let passages = carve(&mut grid, 4, &mut rng);
        assert_eq!(passages, 9);
        assert!(grid.open.iter().all(|&o| o));
        assert!(grid.visited.iter().all(|&v| v));
    }

    #[test]
    fn test_single_cell_carves_nothing() {
        let mut grid = Corridor {
            visited: vec![false; 1],
            open: vec![],
        };
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(carve(&mut grid, 0, &mut rng), 0);
        assert!(grid.visited[0]);
    }
}
