//! Glyph tables for drawing a maze as text.
//!
//! Both tables are indexed by a 4 bit set of line segments radiating from the middle of the glyph:
//!
//! | bit | value | segment |
//! |-----|-------|---------|
//! | 0   | 1     | up      |
//! | 1   | 2     | right   |
//! | 2   | 4     | down    |
//! | 3   | 8     | left    |
//!
//! For `corners` the segments are the walls meeting at a grid intersection, so `UP | DOWN` is a
//! vertical wall and `LEFT | RIGHT` a horizontal one. For `solution` the segments are the sides of a
//! cell through which the solution path passes, and each entry is the 3 character cell body.
//! The entries are not derivable from one another; the art depends on this exact correspondence.

pub const UP: usize = 0b0001;
pub const RIGHT: usize = 0b0010;
pub const DOWN: usize = 0b0100;
pub const LEFT: usize = 0b1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    pub corners: [char; 16],
    pub solution: [&'static str; 16],
}

impl GlyphSet {
    #[inline]
    pub fn corner(&self, segments: usize) -> char {
        self.corners[segments & 0xf]
    }

    #[inline]
    pub fn cell_body(&self, segments: usize) -> &'static str {
        self.solution[segments & 0xf]
    }

    /// Wall between two cells side by side.
    #[inline]
    pub fn vertical_wall(&self) -> char {
        self.corner(UP | DOWN)
    }

    /// Wall along the top or bottom of one cell.
    pub fn horizontal_bar(&self) -> String {
        let bar = self.corner(LEFT | RIGHT);
        [bar, bar, bar].iter().collect()
    }

    /// The path crossing an open vertical wall: the middle of the left to right cell body.
    pub fn path_across(&self) -> char {
        self.cell_body(LEFT | RIGHT).chars().nth(1).unwrap_or(' ')
    }

    /// The path crossing an open horizontal wall.
    #[inline]
    pub fn path_along(&self) -> &'static str {
        self.cell_body(UP | DOWN)
    }
}

pub const UNICODE_GLYPHS: GlyphSet = GlyphSet {
    corners: [
        ' ', '╹', '╺', '┗',
        '╻', '┃', '┏', '┣',
        '╸', '┛', '━', '┻',
        '┓', '┫', '┳', '╋',
    ],
    // A path only ever passes through two sides of a cell.
    solution: [
        "   ", "   ", "   ", " ╰┄",
        "   ", " ┆ ", " ╭┄", "   ",
        "   ", "┄╯ ", "┄┄┄", "   ",
        "┄╮ ", "   ", "   ", "   ",
    ],
};

pub const ASCII_GLYPHS: GlyphSet = GlyphSet {
    corners: [
        ' ', '+', '+', '+',
        '+', '|', '+', '+',
        '+', '+', '-', '+',
        '+', '+', '+', '+',
    ],
    solution: [
        "   ", "   ", "   ", "XXX",
        "   ", "XXX", "XXX", "   ",
        "   ", "XXX", "XXX", "   ",
        "XXX", "   ", "   ", "   ",
    ],
};
