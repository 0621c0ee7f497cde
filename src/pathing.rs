use fnv::FnvHashMap;
use log::debug;

use crate::cells::{Cell, Coordinate};
use crate::errors::*;
use crate::grid::Grid;

/// Step counts from one start cell to every cell reachable from it through open walls.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Coordinate,
    distances: FnvHashMap<Coordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`. None if the start is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Coordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every link is one step, so the first time a cell is reached is also its shortest distance
        // and the distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Coordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Coordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to the linked
/// neighbour closest to the start. The path is returned start first.
/// None if `end_point` cannot be reached.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Coordinate)
                     -> Option<Vec<Coordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let (closer_coord, closer_distance) = grid.links(current_coord)
            .iter()
            .filter_map(|coord| distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d)))
            .min_by_key(|&(_, distance)| distance)?;

        if closer_distance >= current_distance {
            // We have not got any closer to the start, the distances do not belong to this grid.
            return None;
        }

        current_coord = closer_coord;
        current_distance = closer_distance;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// Find the route from the grid's entrance to its exit and mark every cell on it as a solution cell.
/// Marks from any earlier solve are cleared first. Returns the route, entrance first.
///
/// In a perfect maze the route is unique. A grid without an entrance and exit joined by open walls
/// breaks the generator's guarantees and is reported as `ErrorKind::BrokenInvariant`.
pub fn solve(grid: &mut Grid) -> Result<Vec<Coordinate>> {
    let entrance = grid.entrance()
        .map(Cell::coordinate)
        .ok_or_else(|| Error::from(ErrorKind::BrokenInvariant("the maze has no entrance".to_owned())))?;
    let exit = grid.exit()
        .map(Cell::coordinate)
        .ok_or_else(|| Error::from(ErrorKind::BrokenInvariant("the maze has no exit".to_owned())))?;

    let distances = Distances::new(grid, entrance)
        .ok_or_else(|| Error::from(ErrorKind::BrokenInvariant(format!("entrance {} is off the grid", entrance))))?;
    let path = shortest_path(grid, &distances, exit)
        .ok_or_else(|| {
            Error::from(ErrorKind::BrokenInvariant(format!("exit {} is unreachable from entrance {}",
                                                           exit, entrance)))
        })?;

    grid.clear_solution();
    for coord in &path {
        grid.mark_solution(*coord);
    }

    debug!("solved maze from {} to {} in {} steps, furthest cell {} steps away",
           entrance, exit, path.len() - 1, distances.max());
    Ok(path)
}

/// Whether `cell` was marked by `solve`. The predicate handed to the renderer.
#[inline]
pub fn is_solution_cell(cell: &Cell) -> bool {
    cell.is_solution()
}
