//! Passage and anchor analysis.
//!
//! `Grid::free_passage` answers "can a voxel slide out this way"; this
//! module builds on it to answer two higher-level questions: which
//! direction an already-assembled piece can be pulled out along
//! (`movable_direction`), and which voxels around a seed must never be
//! absorbed into the piece under construction because they pin the
//! residual solid (`find_anchors`).

use crate::error::PuzzleError;
use crate::geometry::{Direction, Position, ALL};
use crate::grid::Grid;

/// The starting voxel of a new piece, together with the direction it will
/// ultimately be extracted along and a lateral direction in which it has no
/// solid neighbor (i.e. a surface-facing direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub pos: Position,
    pub removal_dir: Direction,
    pub normal_dir: Direction,
}

/// The direction in which every voxel of `piece_label` has free passage,
/// ignoring higher-labeled (not-yet-placed) voxels. Ties are broken in
/// `geometry::ALL` order. If no direction is free the piece is stuck; this
/// is logged as a diagnostic and the first canonical direction is returned
/// so callers always get a usable answer.
pub fn movable_direction(grid: &Grid, piece_label: u32) -> Direction {
    for d in ALL {
        let blocked = grid
            .all_positions()
            .any(|p| grid.get(p) == piece_label && !grid.free_passage(p, d, true));
        if !blocked {
            return d;
        }
    }

    let fallback = ALL[0];
    log::warn!(
        "{}",
        PuzzleError::StuckPiece {
            piece_id: piece_label,
            attempted_dir: fallback,
        }
    );
    fallback
}

/// The outermost existing voxel in every direction perpendicular to both
/// `seed.normal_dir` and `seed.removal_dir`: walk from the seed until
/// leaving the grid, the farthest existing cell encountered is an anchor.
/// Anchors pin the residual solid and must never be absorbed into, or
/// extruded through by, the piece under construction.
pub fn find_anchors(seed: &Seed, grid: &Grid) -> Vec<Position> {
    let mut anchors = Vec::new();
    for d in ALL {
        if !d.perpendicular_to(seed.normal_dir) || !d.perpendicular_to(seed.removal_dir) {
            continue;
        }

        let mut cur = seed.pos;
        let mut last_existing = None;
        loop {
            let next = cur.step(d);
            if !grid.in_range(next) {
                break;
            }
            if grid.exists(next) {
                last_existing = Some(next);
            }
            cur = next;
        }

        if let Some(a) = last_existing {
            anchors.push(a);
        }
    }
    anchors
}

/// Free passage along `d` through a column that may only contain cells that
/// are still unassigned (label `1`) or belong to the piece just built
/// (label `prev_piece_label`) — used by `construct_subsequent_piece` to
/// decide whether a lateral direction is still viable for the whole spine.
pub fn spine_free_passage(grid: &Grid, p: Position, d: Direction, prev_piece_label: u32) -> bool {
    let mut cur = p.step(d);
    while grid.in_range(cur) {
        if grid.exists(cur) {
            let label = grid.get(cur);
            if label != 1 && label != prev_piece_label {
                return false;
            }
        }
        cur = cur.step(d);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;

    fn solid_cube(n: usize) -> Grid {
        let mut grid = Grid::new(n, n, n);
        for p in grid.all_positions().collect::<Vec<_>>() {
            grid.set(p, 1).unwrap();
        }
        grid
    }

    #[test]
    fn movable_direction_finds_free_axis() {
        let grid = solid_cube(1);
        // a single voxel is free in every direction; +X wins by tie-break order.
        assert_eq!(movable_direction(&grid, 1), Xp);
    }

    #[test]
    fn movable_direction_reports_stuck_with_fallback() {
        let grid = solid_cube(3);
        // the full 3x3x3 cube (all label 1) cannot slide any direction as a whole.
        assert_eq!(movable_direction(&grid, 1), Xp);
    }

    #[test]
    fn find_anchors_walks_to_grid_edge() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(1, 0, 1),
            removal_dir: Yp,
            normal_dir: Yn,
        };
        let anchors = find_anchors(&seed, &grid);
        // perpendicular to Yp/Yn: +X,-X,+Z,-Z, each walking to the far face.
        assert_eq!(anchors.len(), 4);
        assert!(anchors.contains(&Position::new(2, 0, 1)));
        assert!(anchors.contains(&Position::new(0, 0, 1)));
        assert!(anchors.contains(&Position::new(1, 0, 2)));
        assert!(anchors.contains(&Position::new(1, 0, 0)));
    }

    #[test]
    fn spine_free_passage_allows_unassigned_and_previous_piece() {
        let mut grid = solid_cube(3);
        grid.set(Position::new(1, 1, 1), 2).unwrap();
        assert!(spine_free_passage(
            &grid,
            Position::new(1, 0, 1),
            Yp,
            2
        ));
        assert!(!spine_free_passage(
            &grid,
            Position::new(0, 0, 1),
            Yp,
            2
        ));
    }
}
