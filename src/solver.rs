//! Pipeline driver.
//!
//! Wires the seed, passage, blocking, path and expand stages into a
//! sequential per-piece construction loop: `construct_piece` builds piece
//! `piece_id`, advancing `removal_dir_prev` for the next call, until
//! `num_pieces - 1` pieces have been carved and the remainder becomes the
//! final piece whole.

use crate::blocking::{find_blocking_pairs, inaccessible_pairs};
use crate::error::{PuzzleError, Result};
use crate::expand::expand;
use crate::geometry::{Direction, Position, ALL};
use crate::grid::Grid;
use crate::passage::{find_anchors, movable_direction, spine_free_passage, Seed};
use crate::path::{find_shortest_paths, PotentialPiece};
use crate::seed::{first_piece_seed, subsequent_piece_seed};

/// Parameters for a full decomposition run.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub num_pieces: usize,
    pub min_size: usize,
}

impl SolveConfig {
    /// `min_size` defaults to a quarter of the shape's solid count.
    pub fn for_grid(grid: &Grid, num_pieces: usize) -> Self {
        Self {
            num_pieces,
            min_size: grid.total_solid_count() / 4,
        }
    }
}

/// Builds piece `piece_id` (for `piece_id == 1`, the first-piece variant;
/// otherwise the subsequent-piece variant) and returns its seed's
/// `removal_dir`, which becomes `removal_dir_prev` for the next call.
pub fn construct_piece(
    grid: &mut Grid,
    piece_id: u32,
    min_size: usize,
    removal_dir_prev: Option<Direction>,
) -> Result<Direction> {
    if piece_id == 1 {
        construct_first_piece(grid, min_size)
    } else {
        let removal_dir_prev = removal_dir_prev.expect("subsequent pieces require a prior direction");
        construct_subsequent_piece(grid, piece_id, min_size, removal_dir_prev)
    }
}

fn construct_first_piece(grid: &mut Grid, min_size: usize) -> Result<Direction> {
    let seed = first_piece_seed(grid)?;
    log::debug!("piece 1 seed: {:?}", seed);

    let anchors = find_anchors(&seed, grid);
    let pairs = find_blocking_pairs(grid, &seed, &anchors, false);
    let ranked = inaccessible_pairs(grid, &pairs)?;
    log::debug!("piece 1: {} blocking pairs ranked", ranked.len());

    let chosen = smallest_potential_piece(grid, &seed, &ranked, &anchors)?;
    let piece = expand(grid, &seed, chosen, &anchors, min_size, true)?;
    finish_piece(grid, 1, piece);
    Ok(seed.removal_dir)
}

/// Obtains every sorted potential piece across `ranked` blocking pairs (4.F)
/// and picks the smallest (4.H step 5).
fn smallest_potential_piece(
    grid: &Grid,
    seed: &Seed,
    ranked: &[crate::blocking::OrientedPair],
    anchors: &[Position],
) -> Result<PotentialPiece> {
    let mut all = Vec::new();
    for pair in ranked {
        if let Ok(paths) = find_shortest_paths(grid, seed, pair, anchors) {
            all.extend(paths);
        }
    }
    all.sort_by_key(|p| p.voxels.len());
    all.into_iter().next().ok_or(PuzzleError::NoPathFound)
}

fn construct_subsequent_piece(
    grid: &mut Grid,
    piece_id: u32,
    min_size: usize,
    removal_dir_prev: Direction,
) -> Result<Direction> {
    let seed = subsequent_piece_seed(grid, removal_dir_prev, piece_id)?;
    log::debug!("piece {piece_id} seed: {:?}", seed);

    let spine = walk_spine(grid, &seed);

    let mut voxels = spine.clone();
    let mut combined_anchors: Vec<Position> = Vec::new();
    let mut blocking_voxel = seed.pos;
    let mut blocking_normal_dir = seed.normal_dir;

    for d in ALL {
        if d == seed.removal_dir {
            continue;
        }
        if !spine.iter().all(|&p| spine_free_passage(grid, p, d, piece_id)) {
            continue;
        }

        let lateral_seed = Seed {
            pos: seed.pos,
            removal_dir: seed.removal_dir,
            normal_dir: d,
        };
        let anchors = find_anchors(&lateral_seed, grid);
        let pairs = find_blocking_pairs(grid, &lateral_seed, &anchors, true);
        let ranked = inaccessible_pairs(grid, &pairs)?;

        if let Ok(chosen) = smallest_potential_piece(grid, &lateral_seed, &ranked, &anchors) {
            blocking_voxel = chosen.blocking_voxel;
            blocking_normal_dir = d;
            for v in chosen.voxels {
                if !voxels.contains(&v) {
                    voxels.push(v);
                }
            }
        }
        for a in anchors {
            if !combined_anchors.contains(&a) {
                combined_anchors.push(a);
            }
        }
    }

    let piece = PotentialPiece {
        voxels,
        blocking_voxel,
    };
    // `expand`'s blocker-column anchor walks `anchor_seed.normal_dir`, which
    // must match whichever lateral direction actually produced `blocking_voxel`,
    // not `seed.normal_dir` (which only ever equals `removal_dir` here).
    let anchor_seed = Seed {
        pos: seed.pos,
        removal_dir: seed.removal_dir,
        normal_dir: blocking_normal_dir,
    };
    let piece = expand(grid, &anchor_seed, piece, &combined_anchors, min_size, false)?;
    finish_piece(grid, piece_id, piece);
    Ok(seed.removal_dir)
}

/// Absorbs contiguous unassigned voxels starting at `seed.pos` and walking
/// along `seed.removal_dir` until the grid boundary or an already-assigned
/// voxel is reached.
fn walk_spine(grid: &Grid, seed: &Seed) -> Vec<Position> {
    let mut spine = Vec::new();
    let mut cur = seed.pos;
    while grid.in_range(cur) && grid.get(cur) == 1 {
        spine.push(cur);
        cur = cur.step(seed.removal_dir);
    }
    spine
}

fn finish_piece(grid: &mut Grid, piece_id: u32, piece: Vec<Position>) {
    for p in piece {
        // piece voxels may already carry the target label via the spine walk
        if grid.get(p) == 1 {
            grid.set(p, piece_id + 1).unwrap();
        }
    }
}

/// Relabels every remaining unassigned (`1`) voxel to the final piece id.
pub fn designate_final_piece(grid: &mut Grid) {
    let final_label = grid.max_label() + 1;
    grid.relabel(1, final_label);
}

/// Runs the full decomposition: `config.num_pieces - 1` constructed pieces
/// followed by one final piece covering whatever remains.
pub fn run(grid: &mut Grid, config: &SolveConfig) -> Result<()> {
    for p in grid.all_positions().collect::<Vec<_>>() {
        if grid.exists(p) {
            grid.set(p, 1)?;
        }
    }

    let mut removal_dir_prev = None;
    for piece_id in 1..config.num_pieces as u32 {
        let dir = construct_piece(grid, piece_id, config.min_size, removal_dir_prev)?;
        removal_dir_prev = Some(dir);
        log::info!("piece {piece_id} built, removal direction {:?}", dir);
    }

    designate_final_piece(grid);
    let stuck = movable_direction(grid, grid.max_label());
    log::debug!("final piece's freest direction: {:?}", stuck);

    Ok(())
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
    fn construct_first_piece_labels_at_least_min_size_voxels() {
        let mut grid = solid_cube(3);
        let min_size = grid.total_solid_count() / 4;
        construct_piece(&mut grid, 1, min_size, None).unwrap();
        let count = grid.all_positions().filter(|&p| grid.get(p) == 2).count();
        assert!(count >= 1);
    }

    #[test]
    fn designate_final_piece_consumes_every_remaining_unassigned_voxel() {
        let mut grid = solid_cube(2);
        designate_final_piece(&mut grid);
        assert!(grid.all_positions().all(|p| grid.get(p) != 1));
    }

    #[test]
    fn full_decomposition_labels_every_solid_voxel() {
        let mut grid = solid_cube(3);
        let config = SolveConfig::for_grid(&grid, 4);
        run(&mut grid, &config).unwrap();
        assert!(grid.all_positions().all(|p| grid.get(p) != 0 && grid.get(p) != 1));
    }

    #[test]
    fn full_decomposition_produces_expected_piece_count() {
        let mut grid = solid_cube(3);
        let config = SolveConfig::for_grid(&grid, 4);
        run(&mut grid, &config).unwrap();
        assert_eq!(grid.max_label(), 4);
    }
}
