use bit_set::BitSet;
use log::{debug, trace};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Coordinate, Direction};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, RowIndex, Width};

type NeighbourCandidates = SmallVec<[(Direction, Coordinate); 4]>;

/// One cell being carved from, with the neighbours it has yet to try.
#[derive(Debug)]
struct Frame {
    coord: Coordinate,
    candidates: NeighbourCandidates,
}

/// Build a perfect maze of `width` x `height` cells with the recursive backtracker algorithm, then
/// pick a random entrance row on the left edge and a random exit row on the right edge.
///
/// Dimensions are validated before anything is allocated.
pub fn generate<R: Rng + ?Sized>(width: Width, height: Height, rng: &mut R) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;

    recursive_backtracker(&mut grid, rng);

    let entrance_row = rng.gen_range(0..grid.height());
    let exit_row = rng.gen_range(0..grid.height());
    grid.designate_entrance(RowIndex(entrance_row));
    grid.designate_exit(RowIndex(exit_row));

    debug!("generated {}x{} maze with {} passages, entrance row {}, exit row {}",
           grid.width(), grid.height(), grid.links_count(), entrance_row, exit_row);
    Ok(grid)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A random walk from a random start cell: at each step a random untried neighbour is drawn from the
/// current cell; if it has not been visited yet the wall to it is opened and the walk continues from
/// there. When a cell runs out of neighbours the walk backs up to the previous cell. Every cell is
/// entered exactly once, always through a single newly opened wall, so the passages form a spanning tree.
///
/// The walk keeps its own stack rather than recursing, so large grids cannot exhaust the call stack.
/// Walls already opened on the grid are left as they are.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut visited = BitSet::with_capacity(grid.size());
    let start = grid.random_cell(rng);

    let mut stack: Vec<Frame> = Vec::new();
    enter_cell(grid, &mut visited, &mut stack, start);

    while let Some(frame) = stack.last_mut() {
        if frame.candidates.is_empty() {
            stack.pop();
            continue;
        }

        let pick = rng.gen_range(0..frame.candidates.len());
        let (direction, neighbour) = frame.candidates.remove(pick);
        let from = frame.coord;

        if !is_visited(grid, &visited, neighbour) {
            trace!("carving {:?} from {} to {}", direction, from, neighbour);
            grid.open_wall(from, direction);
            enter_cell(grid, &mut visited, &mut stack, neighbour);
        }
    }
}

fn enter_cell(grid: &Grid, visited: &mut BitSet, stack: &mut Vec<Frame>, coord: Coordinate) {
    if let Some(index) = grid.index_of(coord) {
        visited.insert(index);
    }

    let candidates = Direction::ALL
        .iter()
        .map(|dir| (*dir, coord.offset(*dir)))
        .filter(|&(_, neighbour)| grid.is_valid_coordinate(neighbour) && !is_visited(grid, visited, neighbour))
        .collect();

    stack.push(Frame { coord, candidates });
}

fn is_visited(grid: &Grid, visited: &BitSet, coord: Coordinate) -> bool {
    grid.index_of(coord).map_or(true, |index| visited.contains(index))
}
