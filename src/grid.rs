//! Labeled voxel grid.
//!
//! Generic over nothing: unlike a fixed-shape packing puzzle, the shape
//! decomposed here is read from a file at runtime, so the grid is sized
//! dynamically rather than carrying `DIM`/`GRID_SIZE` const generics.
//!
//! Label `0` means empty; label `n >= 1` means solid and assigned to piece
//! `n`. Every solid cell starts at label `1` ("unassigned").

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::{PuzzleError, Result};
use crate::geometry::{Direction, Position, ALL};

/// Base factor in the accessibility recurrence (see `accessibility` module).
pub const ACCESSIBILITY_DEPTH: i32 = 3;

pub struct Grid {
    max_x: usize,
    max_y: usize,
    max_z: usize,
    cells: Vec<u32>,
    accessibility_memo: RefCell<FxHashMap<(Position, u32), f64>>,
}

impl Grid {
    /// Creates an all-empty grid with the given dimensions.
    pub fn new(max_x: usize, max_y: usize, max_z: usize) -> Self {
        Self {
            max_x,
            max_y,
            max_z,
            cells: vec![0; max_x * max_y * max_z],
            accessibility_memo: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.max_x, self.max_y, self.max_z)
    }

    pub fn in_range(&self, p: Position) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && (p.x as usize) < self.max_x
            && (p.y as usize) < self.max_y
            && (p.z as usize) < self.max_z
    }

    fn index_of(&self, p: Position) -> Option<usize> {
        if !self.in_range(p) {
            return None;
        }
        Some(p.x as usize * self.max_y * self.max_z + p.y as usize * self.max_z + p.z as usize)
    }

    /// Out-of-range reads are lenient and return "empty" (`0`).
    pub fn get(&self, p: Position) -> u32 {
        self.index_of(p).map(|i| self.cells[i]).unwrap_or(0)
    }

    /// Out-of-range writes fail with `OutOfBounds`.
    pub fn set(&mut self, p: Position, label: u32) -> Result<()> {
        let idx = self.index_of(p).ok_or(PuzzleError::OutOfBounds(p))?;
        self.cells[idx] = label;
        self.invalidate_accessibility();
        Ok(())
    }

    /// Replaces every cell currently labeled `from` with `to`. Used to
    /// promote the residual solid to its final piece id.
    pub fn relabel(&mut self, from: u32, to: u32) {
        for cell in &mut self.cells {
            if *cell == from {
                *cell = to;
            }
        }
        self.invalidate_accessibility();
    }

    pub fn exists(&self, p: Position) -> bool {
        self.get(p) != 0
    }

    pub fn neighbor_count(&self, p: Position) -> u8 {
        ALL.iter().filter(|&&d| self.exists(p.step(d))).count() as u8
    }

    pub fn exterior_face_count(&self, p: Position) -> u8 {
        6 - self.neighbor_count(p)
    }

    /// No existing voxel lies strictly beyond `p` along `d` within the grid.
    ///
    /// When `allow_higher_labels` is true, a voxel whose label is strictly
    /// greater than `label(p)` is ignored — it is assumed to have already
    /// been removed by the time `p`'s piece slides out.
    pub fn free_passage(&self, p: Position, d: Direction, allow_higher_labels: bool) -> bool {
        let label_p = self.get(p);
        let mut cur = p.step(d);
        while self.in_range(cur) {
            if self.exists(cur) {
                let ignored = allow_higher_labels && self.get(cur) > label_p;
                if !ignored {
                    return false;
                }
            }
            cur = cur.step(d);
        }
        true
    }

    pub fn max_label(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn total_solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Every position in the grid, in row-major (`x`, then `y`, then `z`) order.
    pub fn all_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (max_x, max_y, max_z) = (self.max_x, self.max_y, self.max_z);
        (0..max_x).flat_map(move |x| {
            (0..max_y).flat_map(move |y| {
                (0..max_z).map(move |z| Position::new(x as i32, y as i32, z as i32))
            })
        })
    }

    pub(crate) fn memo_get(&self, p: Position, depth: u32) -> Option<f64> {
        self.accessibility_memo.borrow().get(&(p, depth)).copied()
    }

    pub(crate) fn memo_put(&self, p: Position, depth: u32, value: f64) {
        self.accessibility_memo.borrow_mut().insert((p, depth), value);
    }

    fn invalidate_accessibility(&self) {
        self.accessibility_memo.borrow_mut().clear();
    }
}

/// Maps a label to the character used by the diagnostic grid printer:
/// `.` for empty, a decimal digit for labels `1..=9`, then `A..=Z` for
/// labels `10..=35`.
pub fn label_char(label: u32) -> char {
    match label {
        0 => '.',
        1..=9 => char::from(b'0' + label as u8),
        10..=35 => char::from(b'A' + (label - 10) as u8),
        _ => '?',
    }
}

impl fmt::Display for Grid {
    /// `Dimensions: XxYxZ` followed by one line per `x` slice; within a
    /// slice, each `y` row's cells are printed contiguously and rows are
    /// separated by a single space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dimensions: {}x{}x{}", self.max_x, self.max_y, self.max_z)?;
        for x in 0..self.max_x {
            for y in 0..self.max_y {
                if y > 0 {
                    write!(f, " ")?;
                }
                for z in 0..self.max_z {
                    let label = self.get(Position::new(x as i32, y as i32, z as i32));
                    write!(f, "{}", label_char(label))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
