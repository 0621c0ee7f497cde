use std::fmt;
use std::iter::{Skip, StepBy};
use std::slice;

use itertools::iproduct;
use log::trace;
use rand::Rng;

use crate::cells::{Cell, Coordinate, CoordinateSmallVec, Direction};
use crate::errors::*;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// A rectangular maze grid.
///
/// Cells live in one flat row-major vector; neighbours are found by coordinate arithmetic, never stored.
/// Any coordinate outside the grid resolves to a shared sentinel cell that has no open walls, so neighbour
/// queries at the edges need no bounds checks. Every mutation of the sentinel is a no-op.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    out_of_maze: Cell,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, links: {:?}",
               self.width, self.height, self.links_count())
    }
}

impl Grid {
    /// An unlinked grid: every wall closed, no entrance or exit.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        // Coordinates are signed, so the cell count must also fit an isize.
        let cells_count = w.checked_mul(h)
            .filter(|&count| count > 0 && count <= isize::MAX as usize)
            .ok_or_else(|| Error::from(ErrorKind::InvalidDimension(w, h)))?;

        let mut cells = Vec::with_capacity(cells_count);
        cells.extend(iproduct!(0..h, 0..w)
            .map(|(row, col)| Cell::new(Coordinate::new(row as isize, col as isize))));

        Ok(Grid {
            width: w,
            height: h,
            cells,
            out_of_maze: Cell::out_of_maze(),
        })
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of open walls (passages) between pairs of cells.
    pub fn links_count(&self) -> usize {
        let directed_links: usize = self.cells.iter().map(|cell| cell.open_walls().len()).sum();
        directed_links / 2
    }

    /// The cell at `coord`, or the out of maze sentinel.
    #[inline]
    pub fn cell(&self, coord: Coordinate) -> &Cell {
        match self.index_of(coord) {
            Some(index) => &self.cells[index],
            None => &self.out_of_maze,
        }
    }

    #[inline]
    pub fn cell_at(&self, row: isize, col: isize) -> &Cell {
        self.cell(Coordinate::new(row, col))
    }

    /// The cell one step from `coord` in `direction`, or the sentinel when that leaves the grid.
    #[inline]
    pub fn neighbour(&self, coord: Coordinate, direction: Direction) -> &Cell {
        self.cell(coord.offset(direction))
    }

    #[inline]
    pub fn can_go(&self, coord: Coordinate, direction: Direction) -> bool {
        self.cell(coord).can_go(direction)
    }

    /// Open the wall between `coord` and its neighbour in `direction`, on both sides.
    /// Returns false, changing nothing, if either cell is outside the grid or the direction is `None`.
    pub fn open_wall(&mut self, coord: Coordinate, direction: Direction) -> bool {
        match self.wall_indices(coord, direction) {
            Some((index, neighbour_index)) => {
                self.cells[index].open(direction);
                self.cells[neighbour_index].open(direction.opposite());
                true
            }
            None => false,
        }
    }

    /// Close the wall between `coord` and its neighbour in `direction`, on both sides.
    pub fn close_wall(&mut self, coord: Coordinate, direction: Direction) -> bool {
        match self.wall_indices(coord, direction) {
            Some((index, neighbour_index)) => {
                self.cells[index].close(direction);
                self.cells[neighbour_index].close(direction.opposite());
                true
            }
            None => false,
        }
    }

    /// Cells reachable from `coord` through an open wall.
    pub fn links(&self, coord: Coordinate) -> CoordinateSmallVec {
        self.cell(coord)
            .open_walls()
            .directions()
            .iter()
            .map(|dir| coord.offset(*dir))
            .collect()
    }

    /// Cells within the grid directly up, left, right or down of `coord`, linked or not.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .map(|dir| coord.offset(*dir))
            .filter(|adjacent| self.is_valid_coordinate(*adjacent))
            .collect()
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        let index = rng.gen_range(0..self.size());
        self.index_to_coordinate(index)
    }

    /// Row-major iteration over every cell. Each call starts afresh.
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter { cells: self.cells.iter() }
    }

    /// The cells of row `n`, left to right. Empty if `n` is past the last row.
    pub fn row(&self, n: RowIndex) -> &[Cell] {
        let RowIndex(row) = n;
        if row < self.height {
            &self.cells[row * self.width..(row + 1) * self.width]
        } else {
            &[]
        }
    }

    pub fn rows(&self) -> slice::Chunks<Cell> {
        self.cells.chunks(self.width)
    }

    /// The cells of column `n`, top to bottom.
    pub fn column(&self, n: ColumnIndex) -> StepBy<Skip<slice::Iter<Cell>>> {
        let ColumnIndex(col) = n;
        let skip = if col < self.width { col } else { self.cells.len() };
        self.cells.iter().skip(skip).step_by(self.width)
    }

    /// The entrance cell on the left edge, if one has been designated.
    pub fn entrance(&self) -> Option<&Cell> {
        self.column(ColumnIndex(0)).find(|cell| cell.is_entrance())
    }

    /// The exit cell on the right edge, if one has been designated.
    pub fn exit(&self) -> Option<&Cell> {
        self.column(ColumnIndex(self.width - 1)).find(|cell| cell.is_exit())
    }

    /// Make the cell at `row` of the first column the only entrance.
    pub fn designate_entrance(&mut self, row: RowIndex) -> bool {
        self.designate_edge_cell(row, 0, Cell::set_entrance)
    }

    /// Make the cell at `row` of the last column the only exit.
    pub fn designate_exit(&mut self, row: RowIndex) -> bool {
        let last_col = self.width - 1;
        self.designate_edge_cell(row, last_col, Cell::set_exit)
    }

    pub fn clear_solution(&mut self) {
        for cell in &mut self.cells {
            cell.set_solution(false);
        }
    }

    pub(crate) fn mark_solution(&mut self, coord: Coordinate) {
        if let Some(index) = self.index_of(coord) {
            self.cells[index].set_solution(true);
        }
    }

    /// Is the coordinate within the grid's dimensions.
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.row >= 0 && coord.col >= 0 && (coord.row as usize) < self.height && (coord.col as usize) < self.width
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn index_of(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.width + coord.col as usize)
        } else {
            None
        }
    }

    #[inline]
    fn index_to_coordinate(&self, index: usize) -> Coordinate {
        Coordinate::new((index / self.width) as isize, (index % self.width) as isize)
    }

    fn wall_indices(&self, coord: Coordinate, direction: Direction) -> Option<(usize, usize)> {
        if direction == Direction::None {
            return None;
        }
        let index = self.index_of(coord)?;
        let neighbour_index = self.index_of(coord.offset(direction))?;
        Some((index, neighbour_index))
    }

    fn designate_edge_cell(&mut self, row: RowIndex, col: usize, set_flag: fn(&mut Cell, bool)) -> bool {
        let RowIndex(target_row) = row;
        if target_row >= self.height {
            return false;
        }
        for r in 0..self.height {
            let index = r * self.width + col;
            set_flag(&mut self.cells[index], r == target_row);
        }
        trace!("designated edge cell ({}, {})", target_row, col);
        true
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = CellIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct CellIter<'a> {
    cells: slice::Iter<'a, Cell>,
}

impl<'a> ExactSizeIterator for CellIter<'a> {} // default impl using size_hint()
impl<'a> Iterator for CellIter<'a> {
    type Item = &'a Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cells.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("valid grid dimensions")
    }

    fn gc(row: isize, col: isize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(w, h) in &[(0, 5), (5, 0), (0, 0)] {
            let err = Grid::new(Width(w), Height(h)).expect_err("zero sized grid");
            match *err.kind() {
                ErrorKind::InvalidDimension(ew, eh) => assert_eq!((ew, eh), (w, h)),
                ref other => panic!("expected InvalidDimension, got {:?}", other),
            }
        }
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert!(Grid::new(Width(usize::MAX), Height(2)).is_err());
    }

    #[test]
    fn grid_size() {
        let g = small_grid(7, 3);
        assert_eq!(g.size(), 21);
        assert_eq!(g.width(), 7);
        assert_eq!(g.height(), 3);
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn out_of_range_lookups_give_the_sentinel() {
        let g = small_grid(3, 2);
        for &(row, col) in &[(-1, 0), (0, -1), (2, 0), (0, 3), (isize::MIN, isize::MAX)] {
            let cell = g.cell_at(row, col);
            assert!(!cell.is_in_maze());
            assert!(cell.open_walls().is_empty());
        }
        assert!(g.cell_at(1, 2).is_in_maze());
        assert_eq!(g.cell_at(1, 2).coordinate(), gc(1, 2));
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Coordinate]| {
            let neighbours: Vec<Coordinate> = g.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<Coordinate> = expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_direction() {
        let g = small_grid(2, 2);
        assert!(!g.neighbour(gc(0, 0), Direction::Up).is_in_maze());
        assert!(!g.neighbour(gc(0, 0), Direction::Left).is_in_maze());
        assert_eq!(g.neighbour(gc(0, 0), Direction::Right).coordinate(), gc(0, 1));
        assert_eq!(g.neighbour(gc(0, 0), Direction::Down).coordinate(), gc(1, 0));
        assert_eq!(g.neighbour(gc(1, 1), Direction::None).coordinate(), gc(1, 1));
        assert!(!g.neighbour(gc(1, 1), Direction::Right).is_in_maze());
    }

    #[test]
    fn opening_walls_is_reciprocal() {
        let mut g = small_grid(4, 4);
        let a = gc(1, 0);
        let b = gc(2, 0);
        let c = gc(2, 1);

        assert!(g.open_wall(a, Direction::Down));
        assert!(g.can_go(a, Direction::Down));
        assert!(g.can_go(b, Direction::Up));
        assert_eq!(&*g.links(a), &[b]);
        assert_eq!(&*g.links(b), &[a]);

        assert!(g.open_wall(c, Direction::Left));
        assert!(g.can_go(b, Direction::Right));
        let b_links: Vec<Coordinate> = g.links(b).iter().cloned().sorted().collect();
        assert_eq!(b_links, vec![a, c]);
        assert_eq!(g.links_count(), 2);

        // opening twice changes nothing
        assert!(g.open_wall(b, Direction::Up));
        assert_eq!(g.links_count(), 2);

        assert!(g.close_wall(b, Direction::Up));
        assert!(!g.can_go(a, Direction::Down));
        assert!(!g.can_go(b, Direction::Up));
        assert_eq!(&*g.links(a), &[]);
        assert_eq!(&*g.links(b), &[c]);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn walls_to_outside_the_grid_stay_closed() {
        let mut g = small_grid(3, 3);
        assert!(!g.open_wall(gc(0, 0), Direction::Up));
        assert!(!g.open_wall(gc(0, 0), Direction::Left));
        assert!(!g.open_wall(gc(2, 2), Direction::Down));
        assert!(!g.open_wall(gc(2, 2), Direction::Right));
        assert!(!g.open_wall(gc(1, 1), Direction::None));
        // Mutating through the sentinel is a no-op
        assert!(!g.open_wall(gc(-1, 0), Direction::Down));
        assert!(!g.open_wall(gc(5, 5), Direction::Up));

        assert_eq!(g.links_count(), 0);
        assert!(!g.can_go(gc(0, 0), Direction::Down));
        assert!(g.cell_at(-1, 0).open_walls().is_empty());
    }

    #[test]
    fn coordinate_as_index() {
        let g = small_grid(3, 2);
        let indices: Vec<Option<usize>> = g.iter().map(|cell| g.index_of(cell.coordinate())).collect();
        let expected: Vec<Option<usize>> = (0..6).map(Some).collect();
        assert_eq!(indices, expected);
        assert_eq!(g.index_of(gc(2, 0)), None);
        assert_eq!(g.index_of(gc(0, 3)), None);
        assert_eq!(g.index_of(gc(-1, -1)), None);
    }

    #[test]
    fn random_cell() {
        let g = small_grid(4, 3);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(g.is_valid_coordinate(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn cell_iter_is_row_major_and_restartable() {
        let g = small_grid(2, 2);
        let coords = |iter: CellIter| iter.map(Cell::coordinate).collect::<Vec<_>>();
        let expected = vec![gc(0, 0), gc(0, 1), gc(1, 0), gc(1, 1)];
        let iter = g.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(coords(iter.clone()), expected);
        assert_eq!(coords(iter), expected);
        assert_eq!((&g).into_iter().count(), 4);
    }

    #[test]
    fn rows_and_columns() {
        let g = small_grid(3, 2);
        let row_coords = |row: &[Cell]| row.iter().map(Cell::coordinate).collect::<Vec<_>>();
        assert_eq!(row_coords(g.row(RowIndex(1))), vec![gc(1, 0), gc(1, 1), gc(1, 2)]);
        assert!(g.row(RowIndex(2)).is_empty());
        assert_eq!(g.rows().map(row_coords).collect::<Vec<_>>(),
                   vec![vec![gc(0, 0), gc(0, 1), gc(0, 2)], vec![gc(1, 0), gc(1, 1), gc(1, 2)]]);

        let column: Vec<Coordinate> = g.column(ColumnIndex(2)).map(Cell::coordinate).collect();
        assert_eq!(column, vec![gc(0, 2), gc(1, 2)]);
        assert_eq!(g.column(ColumnIndex(3)).count(), 0);
    }

    #[test]
    fn entrance_and_exit_designation() {
        let mut g = small_grid(3, 4);
        assert!(g.entrance().is_none());
        assert!(g.exit().is_none());

        assert!(g.designate_entrance(RowIndex(2)));
        assert!(g.designate_exit(RowIndex(0)));
        assert_eq!(g.entrance().map(Cell::coordinate), Some(gc(2, 0)));
        assert_eq!(g.exit().map(Cell::coordinate), Some(gc(0, 2)));

        // re-designating moves the flag rather than adding another one
        assert!(g.designate_entrance(RowIndex(3)));
        assert_eq!(g.iter().filter(|c| c.is_entrance()).count(), 1);
        assert_eq!(g.entrance().map(Cell::coordinate), Some(gc(3, 0)));

        assert!(!g.designate_exit(RowIndex(4)));
        assert_eq!(g.exit().map(Cell::coordinate), Some(gc(0, 2)));
    }

    #[test]
    fn single_column_entrance_and_exit_share_a_cell() {
        let mut g = small_grid(1, 3);
        g.designate_entrance(RowIndex(1));
        g.designate_exit(RowIndex(1));
        let entrance = g.entrance().expect("entrance");
        let exit = g.exit().expect("exit");
        assert_eq!(entrance.coordinate(), exit.coordinate());
        assert!(entrance.is_entrance() && entrance.is_exit());
    }

    #[test]
    fn solution_marks() {
        let mut g = small_grid(2, 2);
        g.mark_solution(gc(0, 1));
        g.mark_solution(gc(9, 9));
        assert!(g.cell_at(0, 1).is_solution());
        assert_eq!(g.iter().filter(|c| c.is_solution()).count(), 1);
        assert!(!g.cell_at(9, 9).is_solution());
        g.clear_solution();
        assert!(g.iter().all(|c| !c.is_solution()));
    }
}
