//! The accessibility heuristic: a depth-weighted "how buried is this voxel" score.
//!
//! ```text
//! accessibility(p, 0) = neighbor_count(p)
//! accessibility(p, j) = accessibility(p, j-1)
//!                      + W^j * sum_{d, exists(p.step(d))} accessibility(p.step(d), j-1)
//! ```
//!
//! with `W = 0.1`, evaluated at a fixed depth of 3 everywhere in this crate.
//! Interior voxels accumulate contributions from many existing neighbors;
//! exterior voxels do not, so sorting by ascending accessibility prefers
//! deeply buried candidates.

use crate::error::{PuzzleError, Result};
use crate::geometry::{Position, ALL};
use crate::grid::Grid;

const W: f64 = 0.1;

/// Evaluates the heuristic at `depth`. Fails with `DomainError` if `depth < 0`.
pub fn accessibility(grid: &Grid, p: Position, depth: i32) -> Result<f64> {
    if depth < 0 {
        return Err(PuzzleError::DomainError {
            reason: format!("accessibility depth must be >= 0, got {depth}"),
        });
    }
    Ok(accessibility_memoized(grid, p, depth as u32))
}

fn accessibility_memoized(grid: &Grid, p: Position, depth: u32) -> f64 {
    if let Some(value) = grid.memo_get(p, depth) {
        return value;
    }

    let value = if depth == 0 {
        grid.neighbor_count(p) as f64
    } else {
        let mut neighbor_sum = 0.0;
        for d in ALL {
            let np = p.step(d);
            if grid.exists(np) {
                neighbor_sum += accessibility_memoized(grid, np, depth - 1);
            }
        }
        accessibility_memoized(grid, p, depth - 1) + W.powi(depth as i32) * neighbor_sum
    };

    grid.memo_put(p, depth, value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_cube(n: usize) -> Grid {
        let mut grid = Grid::new(n, n, n);
        for p in grid.all_positions().collect::<Vec<_>>() {
            grid.set(p, 1).unwrap();
        }
        grid
    }

    #[test]
    fn negative_depth_is_domain_error() {
        let grid = solid_cube(3);
        assert!(matches!(
            accessibility(&grid, Position::new(0, 0, 0), -1),
            Err(PuzzleError::DomainError { .. })
        ));
    }

    #[test]
    fn depth_zero_is_neighbor_count() {
        let grid = solid_cube(3);
        assert_eq!(
            accessibility(&grid, Position::new(1, 1, 1), 0).unwrap(),
            6.0
        );
        assert_eq!(
            accessibility(&grid, Position::new(0, 0, 0), 0).unwrap(),
            3.0
        );
    }

    #[test]
    fn depth_one_matches_hand_computed_recurrence() {
        let grid = solid_cube(3);
        // center has 6 neighbors, each of which (being a face center) has 5
        // neighbors of its own (every direction but the one leading back out
        // of the cube): 6 + 0.1 * (6 * 5) = 9.0.
        let value = accessibility(&grid, Position::new(1, 1, 1), 1).unwrap();
        assert!((value - 9.0).abs() < 1e-9);
    }

    #[test]
    fn monotone_in_depth() {
        let grid = solid_cube(3);
        let p = Position::new(1, 1, 1);
        let a0 = accessibility(&grid, p, 0).unwrap();
        let a1 = accessibility(&grid, p, 1).unwrap();
        let a2 = accessibility(&grid, p, 2).unwrap();
        assert!(a1 >= a0);
        assert!(a2 >= a1);
    }

    #[test]
    fn memo_is_invalidated_on_write() {
        let mut grid = solid_cube(3);
        let p = Position::new(1, 1, 1);
        let before = accessibility(&grid, p, 2).unwrap();
        grid.set(Position::new(1, 2, 1), 0).unwrap();
        let after = accessibility(&grid, p, 2).unwrap();
        assert!(after < before);
    }
}
