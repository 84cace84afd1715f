//! File I/O: shape-file parsing and solution save/load.
//!
//! Binary format for `solution.bin` (little endian):
//! - 4 bytes: magic (`ILCK`)
//! - u8: format version
//! - 3 x u32: grid dimensions (`max_x`, `max_y`, `max_z`)
//! - repeat per cell, in `all_positions` (row-major `x`, `y`, `z`) order:
//!   - u32: label

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{PuzzleError, Result};
use crate::geometry::Position;
use crate::grid::Grid;

const FILE_MAGIC: [u8; 4] = *b"ILCK";
const FILE_VERSION: u8 = 1;

/// A 3x3x3 all-solid cube, used when no shape file is given.
pub const BUILTIN_SAMPLE: &str = "3 3 3\n\
xxxxxxxxx\n\
xxxxxxxxx\n\
xxxxxxxxx\n";

/// Parses a shape file's text body into a grid. Line 1 is `X Y Z`; the rest
/// is whitespace-insensitive `.`/`x` tokens in `x`-outer/`y`-middle/`z`-inner
/// order, exactly `X*Y*Z` of them.
pub fn parse_shape(text: &str) -> Result<Grid> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(PuzzleError::BadInput {
        reason: "empty shape file".into(),
    })?;

    let dims: Vec<usize> = header
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>().map_err(|_| PuzzleError::BadInput {
                reason: format!("invalid dimension token {tok:?}"),
            })
        })
        .collect::<Result<_>>()?;
    let [max_x, max_y, max_z] = dims[..] else {
        return Err(PuzzleError::BadInput {
            reason: "expected exactly three dimensions on line 1".into(),
        });
    };
    if max_x == 0 || max_y == 0 || max_z == 0 {
        return Err(PuzzleError::BadInput {
            reason: "dimensions must be positive".into(),
        });
    }

    let tokens: Vec<char> = lines
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    let expected = max_x * max_y * max_z;
    if tokens.len() != expected {
        return Err(PuzzleError::BadInput {
            reason: format!(
                "expected {expected} shape tokens, found {}",
                tokens.len()
            ),
        });
    }

    let mut grid = Grid::new(max_x, max_y, max_z);
    let mut i = 0;
    for x in 0..max_x {
        for y in 0..max_y {
            for z in 0..max_z {
                let label = match tokens[i] {
                    '.' => 0,
                    'x' => 1,
                    c => {
                        return Err(PuzzleError::BadInput {
                            reason: format!("unexpected shape token {c:?}"),
                        })
                    }
                };
                if label != 0 {
                    grid.set(Position::new(x as i32, y as i32, z as i32), label)?;
                }
                i += 1;
            }
        }
    }
    Ok(grid)
}

/// Loads and parses a shape file from disk.
pub fn load_shape(path: &Path) -> Result<Grid> {
    let text = std::fs::read_to_string(path)?;
    parse_shape(&text)
}

/// Renders a grid back into the shape-file textual convention, used by the
/// round-trip test.
pub fn format_shape(grid: &Grid) -> String {
    let (max_x, max_y, max_z) = grid.dimensions();
    let mut out = format!("{max_x} {max_y} {max_z}\n");
    for x in 0..max_x {
        for y in 0..max_y {
            for z in 0..max_z {
                let c = if grid.exists(Position::new(x as i32, y as i32, z as i32)) {
                    'x'
                } else {
                    '.'
                };
                out.push(c);
            }
        }
        out.push('\n');
    }
    out
}

/// Saves a labeled grid to a `solution.bin`-style binary file.
pub fn save_solution(grid: &Grid, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&FILE_MAGIC)?;
    file.write_all(&[FILE_VERSION])?;

    let (max_x, max_y, max_z) = grid.dimensions();
    for dim in [max_x, max_y, max_z] {
        file.write_all(&(dim as u32).to_le_bytes())?;
    }

    for p in grid.all_positions() {
        file.write_all(&grid.get(p).to_le_bytes())?;
    }
    Ok(())
}

/// Loads a grid previously written by `save_solution`.
pub fn load_solution(path: &Path) -> Result<Grid> {
    let mut file = File::open(path)?;

    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    if magic != FILE_MAGIC {
        return Err(PuzzleError::BadInput {
            reason: "solution file missing magic header".into(),
        });
    }

    let mut version = [0u8; 1];
    file.read_exact(&mut version)?;
    if version[0] != FILE_VERSION {
        return Err(PuzzleError::BadInput {
            reason: format!("unsupported solution file version {}", version[0]),
        });
    }

    let mut dims = [0u8; 12];
    file.read_exact(&mut dims)?;
    let max_x = u32::from_le_bytes(dims[0..4].try_into().unwrap()) as usize;
    let max_y = u32::from_le_bytes(dims[4..8].try_into().unwrap()) as usize;
    let max_z = u32::from_le_bytes(dims[8..12].try_into().unwrap()) as usize;

    let mut grid = Grid::new(max_x, max_y, max_z);
    for p in grid.all_positions().collect::<Vec<_>>() {
        let mut label_bytes = [0u8; 4];
        file.read_exact(&mut label_bytes)?;
        let label = u32::from_le_bytes(label_bytes);
        if label != 0 {
            grid.set(p, label)?;
        }
    }
    Ok(grid)
}
