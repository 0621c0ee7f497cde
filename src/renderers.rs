use std::fmt;

use log::trace;

use crate::cells::{Cell, Direction};
use crate::glyphs::{GlyphSet, DOWN, LEFT, RIGHT, UNICODE_GLYPHS, UP};
use crate::grid::Grid;
use crate::pathing;

/// Draw `grid` as text, one line at a time, into `line_sink`.
///
/// Produces `2 * height + 1` lines of `4 * width + 1` glyphs: a separator line above every row of
/// cells, the row itself, and a bottom border. Cells for which `is_solution_cell` holds get the
/// solution path drawn through them. The grid is only read.
pub fn render<F, S>(grid: &Grid, is_solution_cell: F, glyphs: &GlyphSet, mut line_sink: S)
    where F: Fn(&Cell) -> bool,
          S: FnMut(&str)
{
    let painter = TextPainter {
        grid,
        is_solution_cell: &is_solution_cell,
        glyphs,
    };

    for row in grid.rows() {
        line_sink(painter.row_separator(row).as_str());
        line_sink(painter.row_body(row).as_str());
    }
    line_sink(painter.bottom_border().as_str());

    trace!("rendered {}x{} maze", grid.width(), grid.height());
}

/// `render` collected into owned lines.
pub fn render_to_lines<F>(grid: &Grid, is_solution_cell: F, glyphs: &GlyphSet) -> Vec<String>
    where F: Fn(&Cell) -> bool
{
    let mut lines = Vec::with_capacity(2 * grid.height() + 1);
    render(grid, is_solution_cell, glyphs, |line| lines.push(line.to_owned()));
    lines
}

struct TextPainter<'a> {
    grid: &'a Grid,
    is_solution_cell: &'a dyn Fn(&Cell) -> bool,
    glyphs: &'a GlyphSet,
}

impl<'a> TextPainter<'a> {

    fn on_path(&self, cell: &Cell) -> bool {
        (self.is_solution_cell)(cell)
    }

    fn up(&self, cell: &Cell) -> &'a Cell {
        self.grid.neighbour(cell.coordinate(), Direction::Up)
    }

    fn left(&self, cell: &Cell) -> &'a Cell {
        self.grid.neighbour(cell.coordinate(), Direction::Left)
    }

    /// Glyph at the intersection touching the top left of `cell`.
    fn corner(&self, cell: &Cell) -> char {
        let up = self.up(cell);
        let left = self.left(cell);

        let mut index = 0;
        if !(up.is_entrance() || up.can_go(Direction::Left)) {
            index |= UP;
        }
        if !cell.can_go(Direction::Up) {
            index |= RIGHT;
        }
        if !(cell.is_entrance() || cell.can_go(Direction::Left)) {
            index |= DOWN;
        }
        if !left.can_go(Direction::Up) {
            index |= LEFT;
        }

        // Nothing above the top row or left of the first column.
        if cell.row() == 0 {
            index &= !UP;
        }
        if cell.col() == 0 {
            index &= !LEFT;
        }

        self.glyphs.corner(index)
    }

    /// Intersection on the right edge of the maze, at the top right of the last cell in a row.
    fn row_separator_end(&self, last_cell: &Cell) -> char {
        let up = self.up(last_cell);

        let mut index = 0;
        if !up.is_exit() {
            index |= UP;
        }
        if !last_cell.is_exit() {
            index |= DOWN;
        }
        if !last_cell.can_go(Direction::Up) {
            index |= LEFT;
        }

        if last_cell.row() == 0 {
            index &= !UP;
        }

        self.glyphs.corner(index)
    }

    /// Solution path drawn inside a cell, joining the sides where the path enters and leaves it.
    fn cell_body(&self, cell: &Cell) -> &'static str {
        if !self.on_path(cell) {
            return "   ";
        }

        let path_goes = |direction| {
            cell.can_go(direction) && self.on_path(self.grid.neighbour(cell.coordinate(), direction))
        };

        let mut index = 0;
        if path_goes(Direction::Up) {
            index |= UP;
        }
        if cell.is_exit() || path_goes(Direction::Right) {
            index |= RIGHT;
        }
        if path_goes(Direction::Down) {
            index |= DOWN;
        }
        if cell.is_entrance() || path_goes(Direction::Left) {
            index |= LEFT;
        }

        self.glyphs.cell_body(index)
    }

    /// The line of walls above a row of cells.
    fn row_separator(&self, row: &[Cell]) -> String {
        let mut line = String::new();
        for cell in row {
            line.push(self.corner(cell));
            if cell.can_go(Direction::Up) {
                if self.on_path(cell) && self.on_path(self.up(cell)) {
                    line.push_str(self.glyphs.path_along());
                } else {
                    line.push_str("   ");
                }
            } else {
                line.push_str(&self.glyphs.horizontal_bar());
            }
        }
        if let Some(last_cell) = row.last() {
            line.push(self.row_separator_end(last_cell));
        }
        line
    }

    /// A row of cells with the walls between them.
    fn row_body(&self, row: &[Cell]) -> String {
        let mut line = String::new();
        for cell in row {
            if cell.is_entrance() || cell.can_go(Direction::Left) {
                let joined = self.on_path(cell) && (cell.is_entrance() || self.on_path(self.left(cell)));
                line.push(if joined { self.glyphs.path_across() } else { ' ' });
            } else {
                line.push(self.glyphs.vertical_wall());
            }
            line.push_str(self.cell_body(cell));
        }

        if let Some(last_cell) = row.last() {
            if last_cell.is_exit() {
                line.push(if self.on_path(last_cell) { self.glyphs.path_across() } else { ' ' });
            } else {
                line.push(self.glyphs.vertical_wall());
            }
        }
        line
    }

    /// The line of walls below the last row. The only neighbours left to consider are to the left.
    fn bottom_border(&self) -> String {
        let last_row = match self.grid.rows().last() {
            Some(row) => row,
            None => return String::new(),
        };

        let mut line = String::new();
        for cell in last_row {
            let mut index = LEFT | RIGHT;
            if !(cell.is_entrance() || cell.can_go(Direction::Left)) {
                index |= UP;
            }
            if cell.col() == 0 {
                index &= !LEFT;
            }
            line.push(self.glyphs.corner(index));
            line.push_str(&self.glyphs.horizontal_bar());
        }

        // Bottom right corner: the right wall above it is missing when the exit is on the last row.
        if let Some(last_cell) = last_row.last() {
            let mut index = LEFT;
            if !last_cell.is_exit() {
                index |= UP;
            }
            line.push(self.glyphs.corner(index));
        }
        line
    }
}

/// Box drawing view of the grid and any solution marked on it.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = Ok(());
        render(self, pathing::is_solution_cell, &UNICODE_GLYPHS, |line| {
            if result.is_ok() {
                result = writeln!(f, "{}", line);
            }
        });
        result
    }
}
