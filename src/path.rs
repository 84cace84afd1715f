//! Path search.
//!
//! Once a blocking pair is known, this module finds a simple path of
//! existing voxels from the seed to the pair's blockee that, once absorbed,
//! frees the blockee by routing around the blocker rather than through it. A
//! path is a `PotentialPiece`: every cell on it becomes part of the piece
//! under construction.

use crate::blocking::OrientedPair;
use crate::error::{PuzzleError, Result};
use crate::geometry::{Direction, Position, ALL};
use crate::grid::Grid;
use crate::passage::Seed;

/// A candidate extension to the piece under construction: a simple path of
/// existing voxels, each reachable from the last by an axis step, none of
/// them anchors and none collinear with the blocker along the seed's normal
/// direction (such a voxel sits directly behind the blocker, in the column
/// the blocker alone pins). `blocking_voxel` is inherited from the
/// `OrientedPair` that produced this path — `expand` walks from it to find
/// the blocker-column anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialPiece {
    pub voxels: Vec<Position>,
    pub blocking_voxel: Position,
}

/// Enumerates every simple path from `seed.pos` to `pair.blockee`, not
/// exceeding `max_len` voxels, that avoids anchors, re-entering `seed.pos`
/// itself, and voxels collinear with `pair.blocker` along `seed.normal_dir`.
///
/// Depth-first, so paths are returned in the canonical `geometry::ALL`
/// direction order at each branch — deterministic, not sorted by length.
/// Reaching `pair.blockee` ends a branch immediately rather than recursing
/// past it.
pub fn find_paths(
    grid: &Grid,
    seed: &Seed,
    pair: &OrientedPair,
    anchors: &[Position],
    max_len: usize,
) -> Vec<PotentialPiece> {
    let mut results = Vec::new();
    let mut path = Vec::new();
    search(grid, seed, pair, anchors, max_len, seed.pos, &mut path, &mut results);
    results
}

fn search(
    grid: &Grid,
    seed: &Seed,
    pair: &OrientedPair,
    anchors: &[Position],
    max_len: usize,
    current: Position,
    path: &mut Vec<Position>,
    results: &mut Vec<PotentialPiece>,
) {
    if path.len() >= max_len {
        return;
    }

    for d in ALL {
        let next = current.step(d);
        if !grid.exists(next) {
            continue;
        }
        if next == seed.pos {
            continue;
        }
        if anchors.contains(&next) {
            continue;
        }
        if pair.blocker.collinear_with(next, seed.normal_dir) {
            continue;
        }
        if path.contains(&next) {
            continue;
        }

        if next == pair.blockee {
            let mut voxels = path.clone();
            voxels.push(next);
            results.push(PotentialPiece {
                voxels,
                blocking_voxel: pair.blocker,
            });
            continue;
        }

        path.push(next);
        search(grid, seed, pair, anchors, max_len, next, path, results);
        path.pop();
    }
}

/// Appends every existing voxel strictly beyond any path voxel along
/// `removal_dir`, up to the grid boundary, so a piece never leaves an
/// unsupported overhang once the voxels below it are carved away. Fails
/// (returns `None`) if any such voxel is an anchor — the piece cannot claim
/// a cell that pins the residual solid.
pub fn add_upward_voxels(
    grid: &Grid,
    piece: &PotentialPiece,
    removal_dir: Direction,
    anchors: &[Position],
) -> Option<PotentialPiece> {
    let mut voxels = piece.voxels.clone();
    for &p in &piece.voxels {
        let mut cur = p.step(removal_dir);
        while grid.exists(cur) {
            if !voxels.contains(&cur) {
                if anchors.contains(&cur) {
                    return None;
                }
                voxels.push(cur);
            }
            cur = cur.step(removal_dir);
        }
    }
    Some(PotentialPiece {
        voxels,
        blocking_voxel: piece.blocking_voxel,
    })
}

/// Finds the shortest path (by voxel count) from `seed.pos` to `pair.blockee`,
/// increasing the search bound one step at a time starting from the direct
/// Manhattan distance between them. Each raw path is augmented with
/// `add_upward_voxels` along `seed.removal_dir` and kept only if that
/// augmentation succeeds; the seed position itself is always appended, since
/// it is always part of the piece. The bound never exceeds the sum of the
/// grid's three dimensions — any simple path longer than that would have to
/// revisit a plane, which `search`'s `path.contains` check already forbids,
/// so the true shortest path (if one exists at all) is always found at or
/// before that ceiling.
pub fn find_shortest_paths(
    grid: &Grid,
    seed: &Seed,
    pair: &OrientedPair,
    anchors: &[Position],
) -> Result<Vec<PotentialPiece>> {
    let (max_x, max_y, max_z) = grid.dimensions();
    let ceiling = max_x + max_y + max_z;

    let mut bound = manhattan_distance(seed.pos, pair.blockee).max(1);
    while bound <= ceiling {
        let raw = find_paths(grid, seed, pair, anchors, bound);
        let augmented: Vec<PotentialPiece> = raw
            .into_iter()
            .filter_map(|mut candidate| {
                if !candidate.voxels.contains(&seed.pos) {
                    candidate.voxels.push(seed.pos);
                }
                add_upward_voxels(grid, &candidate, seed.removal_dir, anchors)
            })
            .collect();

        if !augmented.is_empty() {
            let shortest_len = augmented.iter().map(|p| p.voxels.len()).min().unwrap();
            let mut kept: Vec<PotentialPiece> = augmented
                .into_iter()
                .filter(|p| p.voxels.len() == shortest_len)
                .collect();
            kept.sort_by_key(|p| p.voxels.len());
            return Ok(kept);
        }
        bound += 1;
    }

    Err(PuzzleError::NoPathFound)
}

fn manhattan_distance(a: Position, b: Position) -> usize {
    ((a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs() + (a.z - b.z).unsigned_abs()) as usize
}
