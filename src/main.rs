use docopt::Docopt;
use log::info;
use maze_art::{
    generators,
    glyphs::{ASCII_GLYPHS, UNICODE_GLYPHS},
    pathing,
    renderers,
    units::{Height, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Art

Draws a random perfect maze and the route through it.

Usage:
    maze_art [--width=<w>] [--height=<h>] [--ascii] [--seed=<n>] [--text-out=<path>]
    maze_art (-h | --help)

Options:
    -h --help              Show this screen.
    --width=<w>            Number of cells across the maze [default: 20].
    --height=<h>           Number of cells down the maze [default: 20].
    --ascii                Draw with plain ASCII instead of box drawing characters.
    --seed=<n>             Seed for the maze generator. A random seed is chosen and logged if not given.
    --text-out=<path>      Output file path for the maze text instead of standard output.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_ascii: bool,
    flag_seed: Option<u64>,
    flag_text_out: String,
}

// The driver's own error types, linking in the library's errors.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_art::errors::Error, ::maze_art::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("maze seed {}", seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let mut maze_grid = generators::generate(Width(args.flag_width), Height(args.flag_height), &mut rng)?;
    pathing::solve(&mut maze_grid)?;

    let glyphs = if args.flag_ascii { &ASCII_GLYPHS } else { &UNICODE_GLYPHS };

    if args.flag_text_out.is_empty() {
        let stdout = io::stdout();
        write_maze(&maze_grid, glyphs, &mut stdout.lock())
            .chain_err(|| "Failed to write maze to standard output")?;
    } else {
        let mut f = io::BufWriter::new(File::create(&args.flag_text_out)
            .chain_err(|| format!("Failed to create text file {}", args.flag_text_out))?);
        write_maze(&maze_grid, glyphs, &mut f)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Stream the rendered lines out, keeping the first write error.
fn write_maze<W: Write>(maze_grid: &maze_art::grid::Grid,
                        glyphs: &maze_art::glyphs::GlyphSet,
                        out: &mut W)
                        -> io::Result<()> {
    let mut result = Ok(());
    renderers::render(maze_grid, pathing::is_solution_cell, glyphs, |line| {
        if result.is_ok() {
            result = writeln!(out, "{}", line);
        }
    });
    result?;
    out.flush()
}
