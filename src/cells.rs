use std::fmt;

use smallvec::SmallVec;

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;
pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    None,
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// The four directions that lead away from a cell, in the order neighbours are considered.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Right, Direction::Down];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// (row, column) step taken when moving one cell in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::None => 0,
            Direction::Up => 0b0001,
            Direction::Left => 0b0010,
            Direction::Right => 0b0100,
            Direction::Down => 0b1000,
        }
    }
}

/// Row and column of a cell. Signed so that positions just outside the grid, e.g. the row above
/// row 0, are representable when asking for neighbours.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub row: isize,
    pub col: isize,
}

impl Coordinate {
    pub fn new(row: isize, col: isize) -> Coordinate {
        Coordinate { row, col }
    }

    #[inline]
    pub fn offset(self, direction: Direction) -> Coordinate {
        let (row_delta, col_delta) = direction.offset();
        Coordinate::new(self.row + row_delta, self.col + col_delta)
    }
}

impl From<(isize, isize)> for Coordinate {
    fn from(row_col_pair: (isize, isize)) -> Coordinate {
        Coordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The set of directions a cell has a passage in. `Direction::None` is never a member.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct OpenWalls(u8);

impl OpenWalls {
    #[inline]
    pub fn contains(self, direction: Direction) -> bool {
        let bit = direction.bit();
        bit != 0 && self.0 & bit == bit
    }

    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    #[inline]
    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn directions(self) -> DirectionSmallVec {
        Direction::ALL
            .iter()
            .cloned()
            .filter(|dir| self.contains(*dir))
            .collect()
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Cell {
    coordinate: Coordinate,
    open_walls: OpenWalls,
    is_entrance: bool,
    is_exit: bool,
    on_solution_path: bool,
    in_maze: bool,
}

impl Cell {
    pub(crate) fn new(coordinate: Coordinate) -> Cell {
        Cell {
            coordinate,
            open_walls: OpenWalls::default(),
            is_entrance: false,
            is_exit: false,
            on_solution_path: false,
            in_maze: true,
        }
    }

    /// The placeholder handed out for every coordinate outside the grid.
    pub(crate) fn out_of_maze() -> Cell {
        Cell {
            in_maze: false,
            ..Cell::new(Coordinate::new(-1, -1))
        }
    }

    #[inline(always)]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline(always)]
    pub fn row(&self) -> isize {
        self.coordinate.row
    }

    #[inline(always)]
    pub fn col(&self) -> isize {
        self.coordinate.col
    }

    #[inline(always)]
    pub fn is_in_maze(&self) -> bool {
        self.in_maze
    }

    #[inline(always)]
    pub fn can_go(&self, direction: Direction) -> bool {
        self.open_walls.contains(direction)
    }

    #[inline(always)]
    pub fn open_walls(&self) -> OpenWalls {
        self.open_walls
    }

    #[inline(always)]
    pub fn is_entrance(&self) -> bool {
        self.is_entrance
    }

    #[inline(always)]
    pub fn is_exit(&self) -> bool {
        self.is_exit
    }

    /// Set by the solver on every cell of the entrance to exit route.
    #[inline(always)]
    pub fn is_solution(&self) -> bool {
        self.on_solution_path
    }

    // Mutators are only reachable through the grid, which never hands out the sentinel mutably.

    pub(crate) fn open(&mut self, direction: Direction) {
        self.open_walls.insert(direction);
    }

    pub(crate) fn close(&mut self, direction: Direction) {
        self.open_walls.remove(direction);
    }

    pub(crate) fn set_entrance(&mut self, is_entrance: bool) {
        self.is_entrance = is_entrance;
    }

    pub(crate) fn set_exit(&mut self, is_exit: bool) {
        self.is_exit = is_exit;
    }

    pub(crate) fn set_solution(&mut self, on_path: bool) {
        self.on_solution_path = on_path;
    }
}
