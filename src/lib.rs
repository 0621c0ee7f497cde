//! **maze_art** generates perfect mazes, finds the route from entrance to exit and draws both as text.
//!
//! ```
//! use maze_art::{generators, glyphs, pathing, renderers, units::{Height, Width}};
//! use rand::SeedableRng;
//!
//! let mut rng = rand_xorshift::XorShiftRng::seed_from_u64(7);
//! let mut grid = generators::generate(Width(4), Height(3), &mut rng).unwrap();
//! pathing::solve(&mut grid).unwrap();
//! let lines = renderers::render_to_lines(&grid, pathing::is_solution_cell, &glyphs::ASCII_GLYPHS);
//! assert_eq!(lines.len(), 7);
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod glyphs;
pub mod grid;
pub mod pathing;
pub mod renderers;
pub mod units;
