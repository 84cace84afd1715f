//! Seed selection.
//!
//! Picks the voxel a new piece grows from: a corner-like boundary voxel for
//! piece 1, and a voxel lateral to the previous piece for every piece after
//! that.

use crate::error::{PuzzleError, Result};
use crate::geometry::{Direction, Position, ALL};
use crate::grid::Grid;
use crate::passage::Seed;

/// Directions probed, in order, to find a first-piece seed's surface normal.
/// `+Y` is excluded: it is always the removal direction for piece 1.
const FIRST_PIECE_NORMAL_PROBE: [Direction; 5] =
    [Direction::Xp, Direction::Xn, Direction::Yn, Direction::Zp, Direction::Zn];

/// All boundary voxels that qualify as a first-piece seed candidate, before
/// the lateral-normal-direction check: existing, exactly two exterior
/// faces, and free to slide out along `+Y`.
pub fn initial_seed_candidates(grid: &Grid) -> Vec<Position> {
    grid.all_positions()
        .filter(|&p| {
            grid.exists(p)
                && grid.exterior_face_count(p) == 2
                && grid.free_passage(p, Direction::Yp, false)
        })
        .collect()
}

/// Picks the seed for the very first piece: the first qualifying candidate
/// in row-major scan order, removal direction fixed at `+Y`.
///
/// A candidate with no free lateral direction is skipped rather than
/// silently defaulting its normal direction to `+Y`.
pub fn first_piece_seed(grid: &Grid) -> Result<Seed> {
    for p in initial_seed_candidates(grid) {
        if let Some(normal_dir) = first_piece_normal_dir(grid, p) {
            return Ok(Seed {
                pos: p,
                removal_dir: Direction::Yp,
                normal_dir,
            });
        }
    }
    Err(PuzzleError::NoSeedFound { piece_id: 1 })
}

/// Probes the five non-`+Y` directions in fixed order, keeping the last one
/// whose neighbor does not exist. `None` if no lateral direction is free.
fn first_piece_normal_dir(grid: &Grid, p: Position) -> Option<Direction> {
    let mut result = None;
    for d in FIRST_PIECE_NORMAL_PROBE {
        if !grid.exists(p.step(d)) {
            result = Some(d);
        }
    }
    result
}

/// Picks the seed for piece `piece_id > 1`: any still-unassigned voxel
/// adjacent (along an axis perpendicular to `removal_dir_prev`) to the piece
/// that was just built (which currently carries label `piece_id`, since
/// `construct_piece` writes `piece_id + 1` only for the piece it is about
/// to build). The adjacency direction becomes the candidate's removal
/// direction; ties are broken by ascending `cost_of_subsequent_seed`, then
/// scan order.
pub fn subsequent_piece_seed(
    grid: &Grid,
    removal_dir_prev: Direction,
    piece_id: u32,
) -> Result<Seed> {
    let previous_piece_label = piece_id;
    let mut best: Option<(Seed, usize)> = None;

    for p in grid.all_positions() {
        if grid.get(p) != 1 {
            continue;
        }
        let removal_dir = ALL.into_iter().find(|&d| {
            d.perpendicular_to(removal_dir_prev) && grid.get(p.step(d)) == previous_piece_label
        });
        let Some(removal_dir) = removal_dir else {
            continue;
        };

        let candidate = Seed {
            pos: p,
            removal_dir,
            normal_dir: removal_dir,
        };
        let cost = cost_of_subsequent_seed(grid, &candidate);
        if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
            best = Some((candidate, cost));
        }
    }

    best.map(|(seed, _)| seed)
        .ok_or(PuzzleError::NoSeedFound { piece_id })
}

/// The number of still-unassigned (`label == 1`) voxels encountered walking
/// from the seed to the grid boundary along its removal direction. A small
/// cost means few new cells get swept into the piece by the mandatory
/// removal-direction extrusion.
pub fn cost_of_subsequent_seed(grid: &Grid, seed: &Seed) -> usize {
    let mut count = 0;
    let mut cur = seed.pos;
    while grid.in_range(cur) {
        if grid.get(cur) == 1 {
            count += 1;
        }
        cur = cur.step(seed.removal_dir);
    }
    count
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

    // Only a voxel already at the topmost `y` layer can have unobstructed
    // `+Y` passage through a genuinely solid cube, so the qualifying
    // 2-face edge voxels are the four top-layer edge-middles; row-major
    // scan order picks the lowest `x`, then `z`, among them.
    #[test]
    fn first_piece_seed_on_full_cube_is_first_qualifying_top_edge() {
        let grid = solid_cube(3);
        let seed = first_piece_seed(&grid).unwrap();
        assert_eq!(seed.pos, Position::new(0, 2, 1));
        assert_eq!(seed.removal_dir, Yp);
        assert_eq!(seed.normal_dir, Xn);
    }

    #[test]
    fn first_piece_seed_with_top_layer_removed() {
        let mut grid = solid_cube(3);
        for x in 0..3 {
            for z in 0..3 {
                grid.set(Position::new(x, 2, z), 0).unwrap();
            }
        }
        let seed = first_piece_seed(&grid).unwrap();
        assert_eq!(seed.pos, Position::new(0, 1, 1));
        assert_eq!(seed.normal_dir, Xn);
    }

    #[test]
    fn no_seed_found_on_empty_grid() {
        let grid = Grid::new(2, 2, 2);
        assert!(matches!(
            first_piece_seed(&grid),
            Err(PuzzleError::NoSeedFound { piece_id: 1 })
        ));
    }

    #[test]
    fn subsequent_seed_prefers_lowest_cost_candidate() {
        let mut grid = solid_cube(3);
        // simulate piece 1 occupying the bottom y=0 layer
        for x in 0..3 {
            for z in 0..3 {
                grid.set(Position::new(x, 0, z), 2).unwrap();
            }
        }
        let seed = subsequent_piece_seed(&grid, Yp, 2).unwrap();
        assert!(seed.removal_dir.perpendicular_to(Yp));
        assert_eq!(grid.get(seed.pos), 1);
    }
}
